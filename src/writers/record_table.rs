use indexmap::IndexSet;
use std::io::Write;
use std::path::Path;

use crate::data_types::classification::{Classification, ClassifiedRecord};
use crate::data_types::cnv_record::CnvRecord;

/// A record to write, optionally with its classification
pub struct RecordRow<'a> {
    record: &'a CnvRecord,
    classification: Option<Classification>
}

impl<'a> RecordRow<'a> {
    pub fn from_record(record: &'a CnvRecord) -> Self {
        Self { record, classification: None }
    }

    pub fn from_classified(classified: &'a ClassifiedRecord) -> Self {
        Self {
            record: classified.record(),
            classification: Some(classified.classification())
        }
    }
}

/// Writes records as a delimited table.
/// The fixed columns come first, followed by the union of all pass-through columns in first-seen order.
/// A header is always written, even if there are no rows.
/// # Arguments
/// * `writer` - the output handle
/// * `delimiter` - the column delimiter
/// * `rows` - the records to write
pub fn write_record_rows<W: Write>(writer: W, delimiter: u8, rows: &[RecordRow]) -> csv::Result<()> {
    let with_classification = rows.iter().any(|r| r.classification.is_some());
    let field_names: IndexSet<&str> = rows.iter()
        .flat_map(|r| r.record.fields().keys().map(|k| k.as_str()))
        .collect();

    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    let mut header: Vec<&str> = vec!["source", "row", "chromosome", "start_pos", "end_pos", "length"];
    if with_classification {
        header.push("classification");
    }
    header.push("issue");
    header.extend(field_names.iter().copied());
    csv_writer.write_record(&header)?;

    for row in rows.iter() {
        let record = row.record;
        let mut values: Vec<String> = vec![
            record.source_label().to_string(),
            record.row_index().to_string(),
            record.chromosome().map(|c| c.to_string()).unwrap_or_default(),
            record.start_pos().map(|v| v.to_string()).unwrap_or_default(),
            record.end_pos().map(|v| v.to_string()).unwrap_or_default(),
            record.length().map(|v| v.to_string()).unwrap_or_default(),
        ];
        if with_classification {
            values.push(row.classification.unwrap_or_default().as_ref().to_string());
        }
        values.push(record.issue().map(|e| e.to_string()).unwrap_or_default());
        for name in field_names.iter() {
            values.push(record.fields().get(*name).cloned().unwrap_or_default());
        }
        csv_writer.write_record(&values)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes records to a file; the delimiter is "," if the file ends with .csv, otherwise tab
/// # Arguments
/// * `filename` - the output path
/// * `rows` - the records to write
pub fn write_record_file(filename: &Path, rows: &[RecordRow]) -> csv::Result<()> {
    let is_csv: bool = filename.extension().unwrap_or_default() == "csv";
    let delimiter: u8 = if is_csv { b',' } else { b'\t' };
    let file = std::fs::File::create(filename)?;
    write_record_rows(std::io::BufWriter::new(file), delimiter, rows)
}
