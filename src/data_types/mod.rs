
/// Normalized chromosome identifiers
pub mod chromosome;
/// TP / FP labels attached to detected calls
pub mod classification;
/// A single CNV call and its genomic region
pub mod cnv_record;
/// A labeled, ordered collection of CNV calls
pub mod cnv_table;
/// Rows and headers of an input file before normalization
pub mod raw_table;
/// Contains tracker for TP, FP, FN and derived metrics
pub mod summary_metrics;
