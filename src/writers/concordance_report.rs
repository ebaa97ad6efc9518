use anyhow::Context;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::set_matcher::SetPartition;
use crate::writers::record_table::{write_record_rows, RecordRow};

/// Writes the sectioned concordance report.
/// The report has one section with the calls common to all sources (from every source), then one section per source with its unique calls.
/// Sources with calls that could not be placed get an extra section listing them.
/// # Arguments
/// * `writer` - the output handle
/// * `partitions` - output of the set matcher, one per source
/// * `timestamp` - free-text analysis timestamp for the header line
pub fn write_concordance<W: Write>(mut writer: W, partitions: &[SetPartition], timestamp: &str) -> anyhow::Result<()> {
    writeln!(writer, "### Analysis timestamp: {timestamp}")?;

    let common_rows: Vec<RecordRow> = partitions.iter()
        .flat_map(|p| p.common().iter().map(RecordRow::from_record))
        .collect();
    writeln!(writer)?;
    writeln!(writer, "### Common CNVs ({}):", common_rows.len())?;
    write_record_rows(&mut writer, b'\t', &common_rows)?;

    for partition in partitions.iter() {
        let unique_rows: Vec<RecordRow> = partition.unique().iter()
            .map(RecordRow::from_record)
            .collect();
        writeln!(writer)?;
        writeln!(writer, "### Unique to {} ({}):", partition.label(), unique_rows.len())?;
        write_record_rows(&mut writer, b'\t', &unique_rows)?;
    }

    for partition in partitions.iter().filter(|p| !p.excluded().is_empty()) {
        let excluded_rows: Vec<RecordRow> = partition.excluded().iter()
            .map(RecordRow::from_record)
            .collect();
        writeln!(writer)?;
        writeln!(writer, "### Excluded from {}, no usable coordinates ({}):", partition.label(), excluded_rows.len())?;
        write_record_rows(&mut writer, b'\t', &excluded_rows)?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes the concordance report to a file, stamped with the current local time
/// # Arguments
/// * `filename` - the output path
/// * `partitions` - output of the set matcher, one per source
pub fn write_concordance_report(filename: &Path, partitions: &[SetPartition]) -> anyhow::Result<()> {
    let file = File::create(filename)
        .with_context(|| format!("Error while creating {filename:?}:"))?;
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    write_concordance(BufWriter::new(file), partitions, &timestamp)
        .with_context(|| format!("Error while writing {filename:?}:"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::chromosome::Chromosome;
    use crate::data_types::cnv_record::{CnvRecord, RegionError};
    use crate::data_types::cnv_table::CnvTable;
    use crate::set_matcher::match_tolerance;

    #[test]
    fn test_report_sections() {
        let gs = CnvTable::new("gs".to_string(), vec![
            CnvRecord::from_coordinates("gs", 0, Chromosome::from(1), 100, 200),
            CnvRecord::from_coordinates("gs", 1, Chromosome::from(2), 100, 200),
        ]);
        let nx = CnvTable::new("nx".to_string(), vec![
            CnvRecord::from_coordinates("nx", 0, Chromosome::from(1), 150, 250),
            CnvRecord::new(
                "nx".to_string(), 1,
                Err(RegionError::MalformedRegion { raw: "x".to_string() }),
                Default::default()
            ),
        ]);
        let partitions = match_tolerance(&[gs, nx], 0);

        let mut buffer: Vec<u8> = vec![];
        write_concordance(&mut buffer, &partitions, "2024-01-01 00:00:00").unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "### Analysis timestamp: 2024-01-01 00:00:00");
        assert_eq!(lines[2], "### Common CNVs (2):");
        assert_eq!(lines[4], "gs\t0\t1\t100\t200\t100\t");
        assert_eq!(lines[5], "nx\t0\t1\t150\t250\t100\t");

        let headings: Vec<&str> = lines.iter()
            .filter(|l| l.starts_with("###"))
            .copied()
            .collect();
        assert_eq!(headings, vec![
            "### Analysis timestamp: 2024-01-01 00:00:00",
            "### Common CNVs (2):",
            "### Unique to gs (1):",
            "### Unique to nx (0):",
            "### Excluded from nx, no usable coordinates (1):",
        ]);
    }
}
