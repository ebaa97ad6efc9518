use anyhow::ensure;
use clap::Args;
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::core::{check_optional_filename, check_required_filename, fill_input_metadata, AFTER_HELP, FULL_VERSION};
use crate::overlap::{DEFAULT_MIN_FRACTION, DEFAULT_TOLERANCE};
use crate::parsing::schema::BuiltinSchema;

#[derive(Args, Clone, Default, Serialize)]
#[clap(author, about,
    after_help = AFTER_HELP
)]
pub struct BenchmarkSettings {
    #[clap(default_value = "")]
    #[clap(hide = true)]
    cnvbench_version: String,

    /// Gold-standard CNV table (XLSX/CSV/TSV)
    #[clap(required = true)]
    #[clap(short = 'g')]
    #[clap(long = "truth")]
    #[clap(value_name = "TABLE")]
    #[clap(help_heading = Some("Input/Output"))]
    pub truth_filename: PathBuf,

    /// Schema of the gold-standard table
    #[clap(long = "truth-schema")]
    #[clap(value_name = "SCHEMA")]
    #[clap(help_heading = Some("Input/Output"))]
    #[clap(default_value = "gold_standard")]
    pub truth_schema: String,

    /// Label of the gold-standard table
    #[clap(long = "truth-tag")]
    #[clap(value_name = "TAG")]
    #[clap(help_heading = Some("Input/Output"))]
    #[clap(default_value = "truth")]
    pub truth_tag: String,

    /// Query CNV table (XLSX/CSV/TSV) from one tool, provide once per tool
    #[clap(required = true)]
    #[clap(short = 'q')]
    #[clap(long = "query")]
    #[clap(value_name = "TABLE")]
    #[clap(help_heading = Some("Input/Output"))]
    pub query_filenames: Vec<PathBuf>,

    /// Schema of the corresponding query [default: "standard"]
    #[clap(short = 's')]
    #[clap(long = "query-schema")]
    #[clap(value_name = "SCHEMA")]
    #[clap(help_heading = Some("Input/Output"))]
    pub query_schemas: Vec<String>,

    /// Label of the corresponding query [default: file name]
    #[clap(short = 't')]
    #[clap(long = "query-tag")]
    #[clap(value_name = "TAG")]
    #[clap(help_heading = Some("Input/Output"))]
    pub query_tags: Vec<String>,

    /// Optional JSON file with additional schema definitions
    #[clap(long = "schema-config")]
    #[clap(value_name = "JSON")]
    #[clap(help_heading = Some("Input/Output"))]
    pub schema_config: Option<PathBuf>,

    /// Output directory containing the summary and classified calls
    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output-dir")]
    #[clap(value_name = "DIR")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_folder: PathBuf,

    /// Optional output debug folder
    #[clap(long = "output-debug")]
    #[clap(value_name = "DIR")]
    #[clap(help_heading = Some("Input/Output"))]
    pub debug_folder: Option<PathBuf>,

    /// Minimum fraction of a query call that must be covered by one truth call to be a TP
    #[clap(long = "min-fraction")]
    #[clap(value_name = "FRAC")]
    #[clap(help_heading = Some("Matching parameters"))]
    #[clap(default_value_t = DEFAULT_MIN_FRACTION)]
    pub min_fraction: f64,

    /// Maximum distance (bp) between a truth call and a query call for the truth call to count as found
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

pub fn check_benchmark_settings(mut settings: BenchmarkSettings) -> anyhow::Result<BenchmarkSettings> {
    // hard code the version in
    settings.cnvbench_version = FULL_VERSION.clone();
    info!("cnvbench version: {:?}", &settings.cnvbench_version);
    info!("Sub-command: benchmark");

    fill_input_metadata(
        &settings.query_filenames, &mut settings.query_schemas, &mut settings.query_tags,
        &BuiltinSchema::Standard.to_string()
    )?;
    ensure!(
        !settings.query_tags.contains(&settings.truth_tag),
        "Truth tag {:?} is also used for a query, provide unique tags", settings.truth_tag
    );

    info!("Inputs:");
    check_required_filename(&settings.truth_filename, "Truth table")?;
    info!("\tTruth: {:?}", &settings.truth_filename);
    info!("\t\tSchema: {:?}", settings.truth_schema);
    info!("\t\tTag: {:?}", settings.truth_tag);
    for (i, filename) in settings.query_filenames.iter().enumerate() {
        check_required_filename(filename, format!("Query #{i}").as_str())?;
        info!("\tQuery #{i}: {filename:?}");
        info!("\t\tSchema: {:?}", settings.query_schemas[i]);
        info!("\t\tTag: {:?}", settings.query_tags[i]);
    }
    check_optional_filename(settings.schema_config.as_deref(), "Schema config")?;
    if let Some(config_fn) = settings.schema_config.as_deref() {
        info!("\tSchema config: {config_fn:?}");
    }

    info!("Outputs:");
    info!("\tOutput folder: {:?}", &settings.output_folder);
    if let Some(debug_folder) = settings.debug_folder.as_ref() {
        info!("\tDebug folder: {debug_folder:?}");
    }

    info!("Matching parameters:");
    ensure!(
        settings.min_fraction > 0.0 && settings.min_fraction <= 1.0,
        "--min-fraction must be in the range (0, 1]"
    );
    info!("\tMinimum fraction: {}", settings.min_fraction);
    info!("\tTolerance: {} bp", settings.tolerance);

    if settings.threads == 0 {
        settings.threads = 1;
    }
    info!("Processing threads: {}", settings.threads);

    Ok(settings)
}
