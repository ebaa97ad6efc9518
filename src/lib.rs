/// Per-tool scoring against a gold standard, combining classification and false-negative search
pub mod benchmark;
/// Fraction-based TP/FP classification of detected calls
pub mod classifier;
/// Command line interface functionality
pub mod cli;
/// Contains various shared data types
pub mod data_types;
/// Tolerance-based search for reference calls no tool detected
pub mod false_negatives;
/// Per-chromosome interval trees for fast overlap candidate lookup
pub mod interval_index;
/// The overlap predicates shared by all comparisons
pub mod overlap;
/// Tooling for parsing input files into meaningful structs / data
pub mod parsing;
/// Common / unique partitioning of CNVs across several tables
pub mod set_matcher;
/// Various utility functions that tend to be very generic
pub mod util;
/// All output writers
pub mod writers;
