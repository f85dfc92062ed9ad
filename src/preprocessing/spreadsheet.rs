//! Чтение исходной таблицы (xlsx/xls/ods) через calamine

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::SpreadsheetError;
use crate::types::{RawCell, RawTable};

fn to_raw(cell: &Data) -> RawCell {
    match cell {
        Data::Empty => RawCell::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            if s.trim().is_empty() {
                RawCell::Empty
            } else {
                RawCell::Text(s.clone())
            }
        }
        Data::Float(f) => RawCell::Number(*f),
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::Bool(b) => RawCell::Text(b.to_string()),
        Data::DateTime(dt) => RawCell::Number(dt.as_f64()),
        _ => RawCell::Empty,
    }
}

/// Первый лист книги; первая строка считается заголовком
pub fn load_table(path: &Path) -> Result<RawTable, SpreadsheetError> {
    let mut workbook = open_workbook_auto(path).map_err(|source| SpreadsheetError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SpreadsheetError::NoWorksheet(path.to_path_buf()))?
        .map_err(SpreadsheetError::Read)?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or(SpreadsheetError::Empty)?
        .iter()
        .map(|cell| to_raw(cell).as_text().unwrap_or_default())
        .collect();

    let rows: Vec<Vec<RawCell>> = rows
        .map(|row| row.iter().map(to_raw).collect())
        .collect();

    tracing::debug!("Loaded {} rows from {}", rows.len(), path.display());

    Ok(RawTable { headers, rows })
}
