/*!
# Region normalizer
Converts a raw source table into a `CnvTable` using a declarative `FieldMapping`.
Bad rows never fail the table: they become records with absent coordinates and a `RegionError` explaining why.
A mapped column missing from the header is the only hard failure.

## Example usage
```rust
use cnvbench::data_types::raw_table::RawTable;
use cnvbench::parsing::normalizer::normalize;
use cnvbench::parsing::schema::FieldMapping;

let raw = RawTable::new(
    vec!["Chromosome Region".to_string(), "Event".to_string()],
    vec![
        vec!["chr7:1.234.567-1.400.000".to_string(), "CN Loss".to_string()],
        vec!["bad-string".to_string(), "CN Gain".to_string()],
    ]
);
let table = normalize(&raw, &FieldMapping::region("Chromosome Region"), "nx").unwrap();
assert_eq!(table.records()[0].start_pos(), Some(1234567));
assert!(table.records()[1].region().is_none());
```
*/
use indexmap::IndexMap;

use crate::data_types::chromosome::Chromosome;
use crate::data_types::cnv_record::{CnvRecord, GenomicRegion, RegionError};
use crate::data_types::cnv_table::CnvTable;
use crate::data_types::raw_table::RawTable;
use crate::parsing::region_string::parse_region;
use crate::parsing::schema::FieldMapping;

#[derive(thiserror::Error, Debug, Eq, PartialEq)]
pub enum NormalizeError {
    #[error("{label}: required column {column:?} is missing")]
    MissingField { label: String, column: String },
}

/// Where the coordinates come from, resolved to column indices
#[derive(Clone, Copy)]
enum ResolvedMapping {
    Columns { chromosome: usize, start: usize, end: usize },
    Region { column: usize }
}

/// Normalizes a raw table into uniform CNV records.
/// Mapped columns are consumed (renamed into the record coordinates); a combined region column is parsed but also kept as a pass-through field.
/// # Arguments
/// * `raw` - the loaded table
/// * `mapping` - where the coordinates live
/// * `label` - the source label for every record
/// # Errors
/// * `NormalizeError::MissingField` if a mapped column is not in the header
pub fn normalize(raw: &RawTable, mapping: &FieldMapping, label: &str) -> Result<CnvTable, NormalizeError> {
    let find_column = |column: &str| -> Result<usize, NormalizeError> {
        raw.column_index(column).ok_or_else(|| NormalizeError::MissingField {
            label: label.to_string(),
            column: column.to_string()
        })
    };

    let resolved = match mapping {
        FieldMapping::Columns { chromosome, start, end } => ResolvedMapping::Columns {
            chromosome: find_column(chromosome)?,
            start: find_column(start)?,
            end: find_column(end)?
        },
        FieldMapping::Region { column } => ResolvedMapping::Region {
            column: find_column(column)?
        }
    };

    let consumed: Vec<usize> = match resolved {
        ResolvedMapping::Columns { chromosome, start, end } => vec![chromosome, start, end],
        ResolvedMapping::Region { .. } => vec![]
    };

    let records = (0..raw.len())
        .map(|row| {
            let region = match resolved {
                ResolvedMapping::Columns { chromosome, start, end } => parse_columns(raw, row, chromosome, start, end),
                ResolvedMapping::Region { column } => parse_region(raw.cell(row, column))
            };
            let fields: IndexMap<String, String> = raw.headers().iter().enumerate()
                .filter(|(col, _)| !consumed.contains(col))
                .map(|(col, header)| (header.clone(), raw.cell(row, col).to_string()))
                .collect();
            CnvRecord::new(label.to_string(), row, region, fields)
        })
        .collect();

    Ok(CnvTable::new(label.to_string(), records))
}

/// Builds a region from separate chromosome / start / end cells
fn parse_columns(raw: &RawTable, row: usize, chromosome: usize, start: usize, end: usize) -> Result<GenomicRegion, RegionError> {
    let headers = raw.headers();

    let chrom_cell = raw.cell(row, chromosome).trim();
    if chrom_cell.is_empty() {
        return Err(RegionError::MissingValue { column: headers[chromosome].clone() });
    }
    let chrom = Chromosome::parse(chrom_cell).ok_or_else(|| RegionError::InvalidValue {
        column: headers[chromosome].clone(),
        raw: chrom_cell.to_string()
    })?;

    let start_pos = parse_coordinate(&headers[start], raw.cell(row, start))?;
    let end_pos = parse_coordinate(&headers[end], raw.cell(row, end))?;
    Ok(GenomicRegion::new(chrom, start_pos, end_pos))
}

/// Parses a coordinate cell, accepting integer-valued floats ("1500.0") from spreadsheet exports
fn parse_coordinate(column: &str, cell: &str) -> Result<u64, RegionError> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Err(RegionError::MissingValue { column: column.to_string() });
    }

    if let Ok(value) = cell.parse::<u64>() {
        return Ok(value);
    }

    match cell.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 => {
            Ok(value as u64)
        },
        _ => Err(RegionError::InvalidValue { column: column.to_string(), raw: cell.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_column_rename() {
        let raw = RawTable::new(
            strings(&["Chr", "Start", "End", "CN State"]),
            vec![
                strings(&["1", "1000", "2000", "1"]),
                strings(&["chrX", "5000.0", "9000", "3"]),
            ]
        );
        let mapping = FieldMapping::columns("Chr", "Start", "End");
        let table = normalize(&raw, &mapping, "gs").unwrap();

        assert_eq!(table.label(), "gs");
        assert_eq!(table.len(), 2);
        let first = &table.records()[0];
        assert_eq!(first.source_label(), "gs");
        assert_eq!(first.chromosome(), Some(&Chromosome::from(1)));
        assert_eq!(first.start_pos(), Some(1000));
        assert_eq!(first.end_pos(), Some(2000));
        assert_eq!(first.length(), Some(1000));

        // mapped columns are consumed, everything else passes through
        let field_names: Vec<&String> = first.fields().keys().collect();
        assert_eq!(field_names, vec!["CN State"]);
        assert_eq!(first.fields()["CN State"], "1");

        let second = &table.records()[1];
        assert_eq!(second.chromosome().unwrap().as_str(), "X");
        assert_eq!(second.start_pos(), Some(5000));
        assert_eq!(second.row_index(), 1);
    }

    #[test]
    fn test_region_column() {
        let raw = RawTable::new(
            strings(&["Sample", "Chromosome Region"]),
            vec![
                strings(&["s1", "chr7:1.234.567-1.400.000"]),
                strings(&["s1", "bad-string"]),
            ]
        );
        let table = normalize(&raw, &FieldMapping::region("Chromosome Region"), "nx").unwrap();

        let good = &table.records()[0];
        assert_eq!(good.chromosome(), Chromosome::parse("7").as_ref());
        assert_eq!(good.start_pos(), Some(1234567));
        assert_eq!(good.end_pos(), Some(1400000));
        // the region column is kept for reporting
        assert_eq!(good.fields()["Chromosome Region"], "chr7:1.234.567-1.400.000");

        let bad = &table.records()[1];
        assert!(bad.region().is_none());
        assert_eq!(bad.issue(), Some(&RegionError::MalformedRegion { raw: "bad-string".to_string() }));
        assert_eq!(table.absent_count(), 1);
    }

    #[test]
    fn test_bad_cells() {
        let raw = RawTable::new(
            strings(&["Chromosome", "Start", "End"]),
            vec![
                strings(&["", "1", "2"]),
                strings(&["1", "abc", "2"]),
                strings(&["1", "10"]),
                strings(&["chr?", "1", "2"]),
                strings(&["2", "-5", "2"]),
                strings(&["2", "7", "3"]),
                strings(&["chrom7", "1", "2"]),
            ]
        );
        let table = normalize(&raw, &FieldMapping::columns("Chromosome", "Start", "End"), "om").unwrap();
        let issues: Vec<Option<&RegionError>> = table.iter().map(|r| r.issue()).collect();
        assert_eq!(issues, vec![
            Some(&RegionError::MissingValue { column: "Chromosome".to_string() }),
            Some(&RegionError::InvalidValue { column: "Start".to_string(), raw: "abc".to_string() }),
            Some(&RegionError::MissingValue { column: "End".to_string() }),
            Some(&RegionError::InvalidValue { column: "Chromosome".to_string(), raw: "chr?".to_string() }),
            Some(&RegionError::InvalidValue { column: "Start".to_string(), raw: "-5".to_string() }),
            None,
            Some(&RegionError::InvalidValue { column: "Chromosome".to_string(), raw: "chrom7".to_string() }),
        ]);

        // inverted coordinates are kept but flagged as degenerate
        assert_eq!(table.degenerate_count(), 1);
        assert_eq!(table.records()[5].start_pos(), Some(7));
    }

    #[test]
    fn test_missing_field() {
        let raw = RawTable::new(strings(&["Chr", "Begin", "End"]), vec![]);
        let result = normalize(&raw, &FieldMapping::columns("Chr", "Start", "End"), "gold");
        assert_eq!(result, Err(NormalizeError::MissingField {
            label: "gold".to_string(), column: "Start".to_string()
        }));
        assert_eq!(result.unwrap_err().to_string(), "gold: required column \"Start\" is missing");

        let result = normalize(&raw, &FieldMapping::region("Chromosome Region"), "nx");
        assert!(matches!(result, Err(NormalizeError::MissingField { .. })));
    }

    #[test]
    fn test_empty_table() {
        let raw = RawTable::new(strings(&["Chr", "Start", "End"]), vec![]);
        let table = normalize(&raw, &FieldMapping::columns("Chr", "Start", "End"), "gs").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.label(), "gs");
    }
}
