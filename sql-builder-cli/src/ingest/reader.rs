//! First-column extraction from CSV and spreadsheet bytes
//!
//! Every row is data: ticket exports never carry a header row, so row 0 is
//! read like any other. Empty cells are dropped here and never reach the
//! validation step.

use std::io::Cursor;

use calamine::{Data, Reader, Xls, Xlsx, open_workbook_from_rs};

use super::IngestError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Supported source formats, detected from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Xlsx,
    Xls,
}

impl SourceFormat {
    /// Detect the format from a filename's extension (case-insensitive)
    pub fn from_filename(filename: &str) -> Result<Self, IngestError> {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or(filename)
            .to_lowercase();

        match extension.as_str() {
            "csv" => Ok(SourceFormat::Csv),
            "xlsx" => Ok(SourceFormat::Xlsx),
            "xls" => Ok(SourceFormat::Xls),
            _ => Err(IngestError::UnsupportedFormat { extension }),
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::Csv => write!(f, "csv"),
            SourceFormat::Xlsx => write!(f, "xlsx"),
            SourceFormat::Xls => write!(f, "xls"),
        }
    }
}

/// Return the first-column value of every row, in row order
pub fn extract_first_column(bytes: &[u8], format: SourceFormat) -> Result<Vec<String>, IngestError> {
    match format {
        SourceFormat::Csv => read_csv_first_column(bytes),
        SourceFormat::Xlsx => read_workbook_first_column::<Xlsx<_>>(bytes),
        SourceFormat::Xls => read_workbook_first_column::<Xls<_>>(bytes),
    }
}

fn read_csv_first_column(bytes: &[u8]) -> Result<Vec<String>, IngestError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut values = Vec::new();
    for (row_idx, record) in rdr.records().enumerate() {
        let record = record
            .map_err(|e| IngestError::malformed(format!("row {}: {}", row_idx + 1, e)))?;

        match record.get(0) {
            Some(cell) if !cell.is_empty() => values.push(cell.to_string()),
            _ => continue,
        }
    }

    Ok(values)
}

fn read_workbook_first_column<'a, R>(bytes: &'a [u8]) -> Result<Vec<String>, IngestError>
where
    R: Reader<Cursor<&'a [u8]>>,
    R::Error: std::fmt::Display,
{
    let mut workbook: R = open_workbook_from_rs(Cursor::new(bytes)).map_err(IngestError::malformed)?;

    let Some(sheet_name) = workbook.sheet_names().first().cloned() else {
        return Ok(Vec::new());
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| IngestError::malformed(format!("sheet '{}': {}", sheet_name, e)))?;

    // The range begins at the first used column; column A is only row[0] when that is 0
    match range.start() {
        Some((_, 0)) => {}
        _ => return Ok(Vec::new()),
    }

    Ok(range
        .rows()
        .filter_map(|row| row.first().and_then(cell_to_string))
        .collect())
}

/// Convert a spreadsheet cell to its text form; `None` for empty and error cells
fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => {
            // Whole numbers come back as floats; "348.0" should read as "348"
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 {
                Some((*f as i64).to_string())
            } else {
                Some(f.to_string())
            }
        }
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(format!("{}", dt)),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
    }
}
