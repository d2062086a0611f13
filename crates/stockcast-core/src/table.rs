//! Header-addressed CSV reading shared by the loaders.

use crate::StockError;
use crate::primitives::{MAX_INPUT_FILE_SIZE, MAX_RECORDS};
use csv::StringRecord;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// One data row, addressed by column name.
pub(crate) struct Row<'a> {
    record: &'a StringRecord,
    columns: &'a BTreeMap<String, usize>,
    line: u64,
}

impl Row<'_> {
    /// Raw text of a column; empty if the column or cell is absent.
    pub(crate) fn text(&self, column: &str) -> &str {
        self.optional_text(column).unwrap_or("")
    }

    /// Raw text of a column if the column exists and the cell is non-empty.
    pub(crate) fn optional_text(&self, column: &str) -> Option<&str> {
        self.columns
            .get(column)
            .and_then(|&i| self.record.get(i))
            .filter(|s| !s.is_empty())
    }

    /// Parse a column as a signed integer.
    pub(crate) fn integer(&self, column: &'static str) -> Result<i64, StockError> {
        let raw = self.text(column);
        raw.parse::<i64>().map_err(|_| self.malformed(column, "integer"))
    }

    /// Build a `MalformedRecord` error for a column of this row.
    pub(crate) fn malformed(&self, column: &'static str, expected: &'static str) -> StockError {
        StockError::MalformedRecord {
            line: self.line,
            field: column,
            value: self.text(column).to_string(),
            expected,
        }
    }
}

/// Read a CSV table with a header row, requiring the given columns.
///
/// Cells are trimmed. Columns not in `required` are still addressable
/// through [`Row::optional_text`].
pub(crate) fn read_table<R, T, F>(
    reader: R,
    required: &[&'static str],
    mut build: F,
) -> Result<Vec<T>, StockError>
where
    R: Read,
    F: FnMut(&Row<'_>) -> Result<T, StockError>,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| StockError::SerializationError(format!("CSV header: {}", e)))?
        .clone();

    let columns: BTreeMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, name)| (name.to_string(), i))
        .collect();

    for &name in required {
        if !columns.contains_key(name) {
            return Err(StockError::MissingColumn(name.to_string()));
        }
    }

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    loop {
        let more = csv_reader
            .read_record(&mut record)
            .map_err(|e| StockError::SerializationError(format!("CSV parse error: {}", e)))?;
        if !more {
            break;
        }

        if rows.len() >= MAX_RECORDS {
            return Err(StockError::LimitExceeded(format!(
                "Row count exceeds maximum {}",
                MAX_RECORDS
            )));
        }

        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let row = Row {
            record: &record,
            columns: &columns,
            line,
        };
        rows.push(build(&row)?);
    }

    Ok(rows)
}

/// Open a table file, treating a missing file as `Ok(None)`.
///
/// The file size is checked before any bytes are read.
pub(crate) fn open_table_file(path: &Path) -> Result<Option<std::fs::File>, StockError> {
    let file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(StockError::IoError(format!(
                "Failed to open '{}': {}",
                path.display(),
                e
            )));
        }
    };

    let metadata = file
        .metadata()
        .map_err(|e| StockError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > MAX_INPUT_FILE_SIZE {
        return Err(StockError::LimitExceeded(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_INPUT_FILE_SIZE
        )));
    }

    Ok(Some(file))
}
