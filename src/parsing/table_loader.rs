use anyhow::{bail, Context};
use calamine::{open_workbook_auto, Data, Reader};
use std::fs::File;
use std::path::Path;

use crate::data_types::cnv_table::CnvTable;
use crate::data_types::raw_table::RawTable;
use crate::parsing::normalizer::normalize;
use crate::parsing::schema::FieldMapping;

/// Loads a tabular file into memory.
/// Spreadsheets (.xlsx/.xls) are read from their first worksheet.
/// For text files, the delimiter is "," for .csv files and tab otherwise; a trailing .gz is decompressed transparently.
/// # Arguments
/// * `filename` - the .xlsx/.xls/.csv/.tsv(.gz) file to load
/// # Errors
/// * if the file is a compressed spreadsheet
/// * if the file cannot be opened or the content is invalid
pub fn load_raw_table(filename: &Path) -> anyhow::Result<RawTable> {
    let is_compressed = filename.extension().unwrap_or_default() == "gz";
    let inner_name = if is_compressed {
        Path::new(filename.file_stem().unwrap_or_default())
    } else {
        filename
    };
    let inner_ext = inner_name.extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    if inner_ext == "xlsx" || inner_ext == "xls" {
        if is_compressed {
            bail!("Compressed spreadsheets are not supported, please decompress {filename:?}");
        }
        return load_spreadsheet(filename);
    }
    let delimiter: u8 = if inner_ext == "csv" { b',' } else { b'\t' };

    let file = File::open(filename)
        .with_context(|| format!("Error while opening {filename:?}:"))?;
    let fp: Box<dyn std::io::Read> = if is_compressed {
        Box::new(flate2::read::MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    };

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true) // exports frequently have ragged rows
        .from_reader(fp);

    let headers: Vec<String> = csv_reader.headers()
        .with_context(|| format!("Error while reading header of {filename:?}:"))?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            // spreadsheet exports often start with a UTF-8 BOM
            let h = if i == 0 { h.trim_start_matches('\u{feff}') } else { h };
            h.trim().to_string()
        })
        .collect();

    let mut rows: Vec<Vec<String>> = vec![];
    for result in csv_reader.records() {
        let row = result.with_context(|| format!("Error while reading {filename:?}:"))?;
        rows.push(row.iter().map(|c| c.to_string()).collect());
    }

    Ok(RawTable::new(headers, rows))
}

/// Reads the first worksheet of a workbook; the first row holds the headers.
fn load_spreadsheet(filename: &Path) -> anyhow::Result<RawTable> {
    let mut workbook = open_workbook_auto(filename)
        .with_context(|| format!("Error while opening {filename:?}:"))?;
    let range = match workbook.worksheet_range_at(0) {
        Some(result) => result.with_context(|| format!("Error while reading first worksheet of {filename:?}:"))?,
        None => bail!("No worksheets found in {filename:?}")
    };

    let mut sheet_rows = range.rows();
    let headers: Vec<String> = match sheet_rows.next() {
        Some(row) => row.iter().map(|c| cell_to_string(c).trim().to_string()).collect(),
        None => vec![]
    };
    let rows: Vec<Vec<String>> = sheet_rows
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    Ok(RawTable::new(headers, rows))
}

/// Converts a worksheet cell into the text the delimited readers would have produced.
/// Whole-number floats lose the fraction, so a numeric 1000000 reads as "1000000".
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string()
    }
}

/// Loads a table from disk and normalizes it with the provided mapping.
/// # Arguments
/// * `filename` - the .xlsx/.xls/.csv/.tsv(.gz) file to load
/// * `mapping` - where the coordinates live in this file
/// * `label` - the source label
/// # Errors
/// * if the file fails to load
/// * if a mapped column is missing
pub fn load_cnv_table(filename: &Path, mapping: &FieldMapping, label: &str) -> anyhow::Result<CnvTable> {
    let raw = load_raw_table(filename)?;
    let table = normalize(&raw, mapping, label)
        .with_context(|| format!("Error while normalizing {filename:?}:"))?;
    Ok(table)
}
