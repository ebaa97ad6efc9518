/*!
# Writers module
Contains the logic for writing the output files for the concordance and benchmark commands.
*/
/// Generates the plain-text concordance report
pub mod concordance_report;
/// Writes CNV records (optionally classified) as a delimited table
pub mod record_table;
/// Generates the summary file
pub mod summary;
