
use anyhow::{bail, ensure};
use clap::{Parser, Subcommand};
use lazy_static::lazy_static;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::cli::benchmark::BenchmarkSettings;
use crate::cli::concordance::ConcordanceSettings;
use crate::parsing::schema::SchemaRegistry;

lazy_static! {
    /// Stores the full version string we plan to use, which is generated in build.rs
    /// # Examples
    /// * `0.3.1-6bb9635-dirty` - while on a dirty branch
    /// * `0.3.1-6bb9635` - with a fresh commit
    pub static ref FULL_VERSION: String = format!("{}-{}", env!("CARGO_PKG_VERSION"), env!("VERGEN_GIT_DESCRIBE"));
}

/// Shared after help string containing the legalese.
pub const AFTER_HELP: &str = "This program comes with ABSOLUTELY NO WARRANTY; it is intended for
Research Use Only and not for use in diagnostic procedures.";

#[derive(Parser)]
#[clap(author,
    version = &**FULL_VERSION,
    about,
    after_help = AFTER_HELP)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

/// cnvbench, a tool for comparing CNV calls across tools and against a gold standard.
/// Select a subcommand to see more usage information:
#[derive(Subcommand)]
pub enum Commands {
    /// Finds the CNVs common to all inputs and unique to each input
    Concordance(Box<ConcordanceSettings>),
    /// Scores one or more tools against a gold standard
    Benchmark(Box<BenchmarkSettings>)
}

pub fn get_cli() -> Cli {
    Cli::parse()
}

/// Checks if a file exists and will otherwise exit
/// # Arguments
/// * `filename` - the file path to check for
/// * `label` - the label to use for error messages
pub fn check_required_filename(filename: &Path, label: &str) -> anyhow::Result<()> {
    if !filename.exists() {
        bail!("{} does not exist: \"{}\"", label, filename.display());
    }
    Ok(())
}

/// Checks if an optional file exists, if it was provided
/// # Arguments
/// * `opt_filename` - the optional file path to check for
/// * `label` - the label to use for error messages
pub fn check_optional_filename(opt_filename: Option<&Path>, label: &str) -> anyhow::Result<()> {
    if let Some(filename) = opt_filename {
        check_required_filename(filename, label)?;
    }
    Ok(())
}

/// Default label for an input file, which is the file name without extensions
pub fn default_tag(filename: &Path) -> String {
    let name = filename.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    match name.split_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem.to_string(),
        _ => name
    }
}

/// Fills in missing schemas and tags for a list of inputs, and verifies that tags are unique.
/// Missing schemas default to `default_schema`, missing tags default to the file stem.
/// # Arguments
/// * `filenames` - the input files
/// * `schemas` - the user provided schemas, may be shorter than `filenames`
/// * `tags` - the user provided tags, may be shorter than `filenames`
/// * `default_schema` - schema used when none was provided
pub fn fill_input_metadata(filenames: &[PathBuf], schemas: &mut Vec<String>, tags: &mut Vec<String>, default_schema: &str) -> anyhow::Result<()> {
    ensure!(schemas.len() <= filenames.len(), "More schemas ({}) than inputs ({})", schemas.len(), filenames.len());
    ensure!(tags.len() <= filenames.len(), "More tags ({}) than inputs ({})", tags.len(), filenames.len());

    schemas.resize(filenames.len(), default_schema.to_string());
    for filename in filenames.iter().skip(tags.len()) {
        tags.push(default_tag(filename));
    }

    let mut seen: BTreeSet<&str> = Default::default();
    for tag in tags.iter() {
        ensure!(!tag.is_empty(), "Input tags must not be empty");
        ensure!(seen.insert(tag.as_str()), "Duplicate input tag: {tag:?}, provide unique tags with --tag");
    }
    Ok(())
}

/// Verifies that every schema name is registered
/// # Arguments
/// * `schemas` - the schema names to check
/// * `schema_config` - optional JSON with extra schema definitions
pub fn check_schemas(schemas: &[String], schema_config: Option<&Path>) -> anyhow::Result<SchemaRegistry> {
    let registry = SchemaRegistry::load(schema_config)?;
    for schema in schemas.iter() {
        if registry.get(schema).is_none() {
            bail!("Unknown schema {schema:?}, expected one of: {}", registry.names().join(", "));
        }
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tag() {
        assert_eq!(default_tag(Path::new("/data/run1/genomestudio.csv")), "genomestudio");
        assert_eq!(default_tag(Path::new("calls.tsv.gz")), "calls");
        assert_eq!(default_tag(Path::new("gold")), "gold");
        assert_eq!(default_tag(Path::new(".hidden")), ".hidden");
    }

    #[test]
    fn test_fill_input_metadata() {
        let filenames = vec![PathBuf::from("a/gs.csv"), PathBuf::from("b/nx.tsv"), PathBuf::from("c/om.csv")];
        let mut schemas = vec!["genomestudio".to_string(), "nxclinical".to_string()];
        let mut tags = vec!["GS".to_string()];
        fill_input_metadata(&filenames, &mut schemas, &mut tags, "standard").unwrap();
        assert_eq!(schemas, vec!["genomestudio", "nxclinical", "standard"]);
        assert_eq!(tags, vec!["GS", "nx", "om"]);

        let filenames = vec![PathBuf::from("a/calls.csv"), PathBuf::from("b/calls.csv")];
        let result = fill_input_metadata(&filenames, &mut vec![], &mut vec![], "standard");
        assert!(result.is_err());
    }

    #[test]
    fn test_check_schemas() {
        assert!(check_schemas(&["omer".to_string(), "standard".to_string()], None).is_ok());
        assert!(check_schemas(&["GenomeStudio".to_string(), "NXCLINICAL".to_string()], None).is_ok());
        let err = check_schemas(&["cnvkit".to_string()], None).unwrap_err();
        assert!(err.to_string().contains("Unknown schema"));

        let config = PathBuf::from("test_data/schema_config.json");
        assert!(check_schemas(&["cnvkit".to_string()], Some(&config)).is_ok());
    }
}
