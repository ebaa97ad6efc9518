use anyhow::ensure;
use clap::Args;
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::core::{check_optional_filename, check_required_filename, fill_input_metadata, AFTER_HELP, FULL_VERSION};
use crate::overlap::DEFAULT_TOLERANCE;
use crate::parsing::schema::BuiltinSchema;

#[derive(Args, Clone, Default, Serialize)]
#[clap(author, about,
    after_help = AFTER_HELP
)]
pub struct ConcordanceSettings {
    #[clap(default_value = "")]
    #[clap(hide = true)]
    cnvbench_version: String,

    /// Input CNV table (XLSX/CSV/TSV), provide once per source
    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "input")]
    #[clap(value_name = "TABLE")]
    #[clap(help_heading = Some("Input/Output"))]
    pub input_filenames: Vec<PathBuf>,

    /// Schema of the corresponding input [default: "standard"]
    #[clap(short = 's')]
    #[clap(long = "schema")]
    #[clap(value_name = "SCHEMA")]
    #[clap(help_heading = Some("Input/Output"))]
    pub input_schemas: Vec<String>,

    /// Label of the corresponding input [default: file name]
    #[clap(short = 't')]
    #[clap(long = "tag")]
    #[clap(value_name = "TAG")]
    #[clap(help_heading = Some("Input/Output"))]
    pub input_tags: Vec<String>,

    /// Optional JSON file with additional schema definitions
    #[clap(long = "schema-config")]
    #[clap(value_name = "JSON")]
    #[clap(help_heading = Some("Input/Output"))]
    pub schema_config: Option<PathBuf>,

    /// Output report file
    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output-file")]
    #[clap(value_name = "TXT")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_filename: PathBuf,

    /// Optional output debug folder
    #[clap(long = "output-debug")]
    #[clap(value_name = "DIR")]
    #[clap(help_heading = Some("Input/Output"))]
    pub debug_folder: Option<PathBuf>,

    /// Maximum distance (bp) between two calls to consider them matching
    #[clap(long = "tolerance")]
    #[clap(value_name = "BP")]
    #[clap(help_heading = Some("Matching parameters"))]
    #[clap(default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: u64,

    /// Number of threads to use
    #[clap(long = "threads")]
    #[clap(value_name = "THREADS")]
    #[clap(default_value = "1")]
    pub threads: usize,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

pub fn check_concordance_settings(mut settings: ConcordanceSettings) -> anyhow::Result<ConcordanceSettings> {
    // hard code the version in
    settings.cnvbench_version = FULL_VERSION.clone();
    info!("cnvbench version: {:?}", &settings.cnvbench_version);
    info!("Sub-command: concordance");

    ensure!(settings.input_filenames.len() >= 2, "At least two inputs are required for a concordance");
    fill_input_metadata(
        &settings.input_filenames, &mut settings.input_schemas, &mut settings.input_tags,
        &BuiltinSchema::Standard.to_string()
    )?;

    info!("Inputs:");
    for (i, filename) in settings.input_filenames.iter().enumerate() {
        check_required_filename(filename, format!("Input #{i}").as_str())?;
        info!("\tInput #{i}: {filename:?}");
        info!("\t\tSchema: {:?}", settings.input_schemas[i]);
        info!("\t\tTag: {:?}", settings.input_tags[i]);
    }
    check_optional_filename(settings.schema_config.as_deref(), "Schema config")?;
    if let Some(config_fn) = settings.schema_config.as_deref() {
        info!("\tSchema config: {config_fn:?}");
    }

    info!("Outputs:");
    info!("\tReport: {:?}", &settings.output_filename);
    if let Some(debug_folder) = settings.debug_folder.as_ref() {
        info!("\tDebug folder: {debug_folder:?}");
    }

    info!("Matching parameters:");
    info!("\tTolerance: {} bp", settings.tolerance);

    if settings.threads == 0 {
        settings.threads = 1;
    }
    info!("Processing threads: {}", settings.threads);

    Ok(settings)
}
