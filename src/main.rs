use indicatif::ParallelProgressIterator;
use itertools::Itertools;
use log::{LevelFilter, debug, error, info, warn};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use cnvbench::benchmark::{benchmark_tool, joint_metrics, MatchConfigBuilder, ToolBenchmark};
use cnvbench::cli::benchmark::{BenchmarkSettings, check_benchmark_settings};
use cnvbench::cli::concordance::{ConcordanceSettings, check_concordance_settings};
use cnvbench::cli::core::{Commands, check_schemas, get_cli};
use cnvbench::data_types::cnv_table::CnvTable;
use cnvbench::false_negatives::find_false_negatives;
use cnvbench::parsing::schema::SchemaRegistry;
use cnvbench::parsing::table_loader::load_cnv_table;
use cnvbench::set_matcher::match_tolerance;
use cnvbench::util::json_io::save_json;
use cnvbench::util::progress_bar::get_progress_style;
use cnvbench::writers::concordance_report::write_concordance_report;
use cnvbench::writers::record_table::{RecordRow, write_record_file};
use cnvbench::writers::summary::{JOINT_LABEL, SummaryWriter};

/// Maximum number of per-record issues to echo at the default log level
const MAX_REPORTED_ISSUES: usize = 5;

fn init_logging(verbosity: u8) {
    let filter_level: LevelFilter = match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace
    };
    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(filter_level)
        .init();
}

fn init_thread_pool(threads: usize) {
    match rayon::ThreadPoolBuilder::new().num_threads(threads).build_global() {
        Ok(()) => {},
        Err(e) => {
            error!("Error while building thread pool: {e}");
            std::process::exit(exitcode::OSERR);
        }
    };
}

/// Creates the debug folder and saves the CLI settings into it
fn save_debug_settings<T: serde::Serialize>(opt_debug_folder: Option<&Path>, settings: &T) {
    if let Some(debug_folder) = opt_debug_folder {
        info!("Creating debug folder at {debug_folder:?}...");
        if let Err(e) = std::fs::create_dir_all(debug_folder) {
            error!("Error while creating debug folder: {e}");
            std::process::exit(exitcode::IOERR);
        }

        let cli_json = debug_folder.join("cli_settings.json");
        info!("Saving CLI options to {cli_json:?}...");
        if let Err(e) = save_json(settings, &cli_json) {
            error!("Error while saving CLI options: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    }
}

/// Loads and normalizes one input table, exiting on failure.
/// Rows without usable coordinates are reported here; the engine silently excludes them.
fn load_table_or_exit(filename: &Path, schema: &str, tag: &str, registry: &SchemaRegistry) -> CnvTable {
    let mapping = match registry.get(schema) {
        Some(m) => m,
        None => {
            // check_schemas verified all names already
            error!("Unknown schema {schema:?} for {filename:?}");
            std::process::exit(exitcode::SOFTWARE);
        }
    };

    info!("Loading {tag:?} from {filename:?} (schema: {schema})...");
    let table = match load_cnv_table(filename, mapping, tag) {
        Ok(t) => t,
        Err(e) => {
            error!("Error while loading {filename:?}: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    };

    if let Some(first) = table.iter().next() {
        debug!("\tColumns: {}", first.fields().keys().join(", "));
    }
    info!("\tLoaded {} records", table.len());

    let absent = table.absent_count();
    if absent > 0 {
        warn!("\t{absent} record(s) without usable coordinates will be excluded from all comparisons");
        for record in table.iter().filter(|r| r.region().is_none()).take(MAX_REPORTED_ISSUES) {
            if let Some(issue) = record.issue() {
                warn!("\t\tRow #{}: {issue}", record.row_index());
            }
        }
        for record in table.iter().filter(|r| r.region().is_none()).skip(MAX_REPORTED_ISSUES) {
            if let Some(issue) = record.issue() {
                debug!("\t\tRow #{}: {issue}", record.row_index());
            }
        }
    }

    let degenerate = table.degenerate_count();
    if degenerate > 0 {
        warn!("\t{degenerate} record(s) have end <= start; they can never be a TP");
    }

    table
}

fn run_concordance(settings: ConcordanceSettings) {
    // start the timer
    let start_time = Instant::now();

    // set up logging before we check the other settings
    init_logging(settings.verbosity);

    let settings = match check_concordance_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while verifying settings: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };
    let registry = match check_schemas(&settings.input_schemas, settings.schema_config.as_deref()) {
        Ok(r) => r,
        Err(e) => {
            error!("Error while verifying schemas: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };

    init_thread_pool(settings.threads);
    save_debug_settings(settings.debug_folder.as_deref(), &settings);

    info!("Loading input tables...");
    let tables: Vec<CnvTable> = settings.input_filenames.iter()
        .zip(settings.input_schemas.iter())
        .zip(settings.input_tags.iter())
        .map(|((filename, schema), tag)| load_table_or_exit(filename, schema, tag, &registry))
        .collect();

    info!("Comparing {} tables with a {} bp tolerance...", tables.len(), settings.tolerance);
    let partitions = match_tolerance(&tables, settings.tolerance);

    info!("Results summary:");
    let total_common: usize = partitions.iter().map(|p| p.common().len()).sum();
    info!("\tCommon CNVs: {total_common}");
    for partition in partitions.iter() {
        info!("\tUnique to {}: {}", partition.label(), partition.unique().len());
        if !partition.excluded().is_empty() {
            info!("\tExcluded from {}: {}", partition.label(), partition.excluded().len());
        }
    }

    info!("Saving report to {:?}...", settings.output_filename);
    if let Err(e) = write_concordance_report(&settings.output_filename, &partitions) {
        error!("Error while saving report: {e:#}");
        std::process::exit(exitcode::IOERR);
    }

    info!("Concordance completed in {} seconds.", start_time.elapsed().as_secs_f64());
}

fn run_benchmark(settings: BenchmarkSettings) {
    // start the timer
    let start_time = Instant::now();

    // set up logging before we check the other settings
    init_logging(settings.verbosity);

    let settings = match check_benchmark_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while verifying settings: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };
    let all_schemas: Vec<String> = std::iter::once(settings.truth_schema.clone())
        .chain(settings.query_schemas.iter().cloned())
        .collect();
    let registry = match check_schemas(&all_schemas, settings.schema_config.as_deref()) {
        Ok(r) => r,
        Err(e) => {
            error!("Error while verifying schemas: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };

    init_thread_pool(settings.threads);

    // create the primary output folder
    info!("Creating output folder at {:?}...", settings.output_folder);
    if let Err(e) = std::fs::create_dir_all(&settings.output_folder) {
        error!("Error while creating output folder: {e}");
        std::process::exit(exitcode::IOERR);
    }
    save_debug_settings(settings.debug_folder.as_deref(), &settings);

    // build our configuration
    let match_config = match MatchConfigBuilder::default()
        .tolerance(settings.tolerance)
        .min_fraction(settings.min_fraction)
        .build() {
        Ok(mc) => mc,
        Err(e) => {
            error!("Error while building match config: {e:?}");
            std::process::exit(exitcode::SOFTWARE);
        }
    };

    info!("Loading input tables...");
    let truth = load_table_or_exit(&settings.truth_filename, &settings.truth_schema, &settings.truth_tag, &registry);
    let queries: Vec<CnvTable> = settings.query_filenames.iter()
        .zip(settings.query_schemas.iter())
        .zip(settings.query_tags.iter())
        .map(|((filename, schema), tag)| load_table_or_exit(filename, schema, tag, &registry))
        .collect();

    info!("Scoring {} tool(s) against {:?}...", queries.len(), truth.label());
    let style = get_progress_style();
    let benchmarks: Vec<ToolBenchmark> = queries.par_iter()
        .map(|query| {
            let result = benchmark_tool(query, &truth, match_config);
            debug!("{}: {:?}", result.label(), result.metrics());
            result
        })
        .progress_with_style(style)
        .collect();
    let union_false_negatives = find_false_negatives(&truth, &queries, match_config.tolerance());
    let joint = joint_metrics(&benchmarks, &union_false_negatives);

    let mut summary_writer = SummaryWriter::new(truth.len() as u64);
    for benchmark in benchmarks.iter() {
        let metrics = benchmark.metrics();
        info!("{}: {metrics:?}", benchmark.label());
        info!("\tRecall: {:.4}", metrics.recall());
        info!("\tPrecision: {:.4}", metrics.precision());
        info!("\tF1: {:.4}", metrics.f1());
        summary_writer.add_tool_benchmark(benchmark);
    }
    info!("{JOINT_LABEL}: {joint:?}");
    info!("\tRecall: {:.4}", joint.recall());
    info!("\tPrecision: {:.4}", joint.precision());
    info!("\tF1: {:.4}", joint.f1());
    summary_writer.add_joint(&benchmarks, &joint);

    // now write things
    let summary_fn = settings.output_folder.join("summary.tsv");
    info!("Saving output summary to {summary_fn:?}...");
    if let Err(e) = summary_writer.write_summary(&summary_fn) {
        error!("Error while saving summary file: {e:#}");
        std::process::exit(exitcode::IOERR);
    }

    for benchmark in benchmarks.iter() {
        let classified_fn: PathBuf = settings.output_folder.join(format!("{}.classified.tsv", benchmark.label()));
        debug!("Saving classified calls to {classified_fn:?}...");
        let classified = benchmark.classified().classified_records();
        let rows: Vec<RecordRow> = classified.iter().map(RecordRow::from_classified).collect();
        if let Err(e) = write_record_file(&classified_fn, &rows) {
            error!("Error while saving classified calls: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    }

    let fn_filename = settings.output_folder.join("false_negatives.tsv");
    info!("Saving {} false negatives to {fn_filename:?}...", union_false_negatives.len());
    let rows: Vec<RecordRow> = union_false_negatives.iter().map(RecordRow::from_record).collect();
    if let Err(e) = write_record_file(&fn_filename, &rows) {
        error!("Error while saving false negatives: {e:#}");
        std::process::exit(exitcode::IOERR);
    }

    info!("Benchmark completed in {} seconds.", start_time.elapsed().as_secs_f64());
}

fn main() {
    let cli = get_cli();
    match cli.command {
        Commands::Concordance(settings) => {
            run_concordance(*settings);
        },
        Commands::Benchmark(settings) => {
            run_benchmark(*settings);
        }
    }

    info!("Process finished successfully.");
}
