//! Shared delimited-file plumbing for the track parsers.

use crate::error::{DatasetError, Result};
use std::fs::File;
use std::path::{Path, PathBuf};

/// A fixed-width delimited file being read row by row.
pub(crate) struct DelimitedFile {
    path: PathBuf,
    reader: csv::Reader<File>,
}

/// One row of a [`DelimitedFile`], already checked for its column count.
pub(crate) struct Row<'a> {
    path: &'a Path,
    line: usize,
    record: csv::StringRecord,
}

impl DelimitedFile {
    /// Open `path`; a missing file is reported as `what` not found.
    pub fn open(path: &Path, what: &'static str, delimiter: u8, has_header: bool) -> Result<Self> {
        if !path.is_file() {
            return Err(DatasetError::not_found(what, path));
        }
        let file = File::open(path).map_err(|e| DatasetError::io(what, path, e))?;
        let reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(has_header)
            .flexible(true)
            .from_reader(file);

        Ok(Self {
            path: path.to_path_buf(),
            reader,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Visit every row, failing on the first row whose width is not `columns`.
    pub fn for_each_row<F>(&mut self, columns: usize, mut f: F) -> Result<()>
    where
        F: FnMut(&Row<'_>) -> Result<()>,
    {
        let mut record = csv::StringRecord::new();
        loop {
            let more = self
                .reader
                .read_record(&mut record)
                .map_err(|e| csv_error(&self.path, e))?;
            if !more {
                return Ok(());
            }

            let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
            if record.len() != columns {
                return Err(DatasetError::malformed(
                    &self.path,
                    line,
                    format!("expected {} columns, found {}", columns, record.len()),
                ));
            }

            let row = Row {
                path: &self.path,
                line,
                record: std::mem::take(&mut record),
            };
            f(&row)?;
            record = row.record;
        }
    }
}

impl Row<'_> {
    pub fn line(&self) -> usize {
        self.line
    }

    /// Raw text of a column. Columns are bounds-checked by `for_each_row`.
    pub fn text(&self, column: usize) -> &str {
        self.record.get(column).unwrap_or("")
    }

    /// Parse a column as a float.
    pub fn float(&self, column: usize, name: &str) -> Result<f64> {
        let text = self.text(column);
        text.trim().parse::<f64>().map_err(|_| {
            DatasetError::malformed(
                self.path,
                self.line,
                format!("{name} (column {column}) is not a number: '{text}'"),
            )
        })
    }

    /// Parse a column as a float, then truncate it to an integer coordinate.
    pub fn coordinate(&self, column: usize, name: &str) -> Result<i64> {
        let value = self.float(column, name)?;
        if !value.is_finite() {
            return Err(self.malformed(format!("{name} (column {column}) is not finite: {value}")));
        }
        let value = value.trunc();
        // i64::MAX is not representable; its nearest f64 is 2^63.
        if value < i64::MIN as f64 || value >= i64::MAX as f64 {
            return Err(self.malformed(format!("{name} (column {column}) is out of range: {value}")));
        }
        Ok(value as i64)
    }

    /// A `Malformed` error pointing at this row.
    pub fn malformed(&self, details: impl Into<String>) -> DatasetError {
        DatasetError::malformed(self.path, self.line, details)
    }
}

fn csv_error(path: &Path, err: csv::Error) -> DatasetError {
    let line = err
        .position()
        .map(|p| p.line() as usize)
        .unwrap_or(0);
    match err.into_kind() {
        csv::ErrorKind::Io(e) => DatasetError::io("track file", path, e),
        other => DatasetError::malformed(path, line, format!("{other:?}")),
    }
}
