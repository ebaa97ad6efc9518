/*!
# CLI module
Command line interface functionality that is specific to cnvbench.
*/

/// The main CLI module that contains the top-level CLI parser and help text
pub mod core;
/// The benchmark CLI subcommand
pub mod benchmark;
/// The concordance CLI subcommand
pub mod concordance;
