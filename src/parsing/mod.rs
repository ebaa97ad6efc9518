/*!
# Parsing module
Contains the logic for parsing vendor CNV tables into normalized `CnvTable`s.
Each input format is described by a named schema that maps its columns onto a chromosome, start, and end.
*/
/// Converts raw rows into CNV records using a field mapping
pub mod normalizer;
/// Parser for "chrN:start-end" style region strings
pub mod region_string;
/// Built-in and user-provided field mappings
pub mod schema;
/// Reads delimited (optionally gzipped) files into raw tables
pub mod table_loader;
