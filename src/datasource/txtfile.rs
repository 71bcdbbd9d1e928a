use std::{
    fs::File,
    io::{self, BufRead},
    path::Path,
};

use ndarray::Array2;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextSourceError {
    #[error("unable to open file")]
    FileOpenFailed(#[source] std::io::Error),
    #[error("bad line read")]
    BadLineRead(#[source] std::io::Error),
    #[error("unparseable float {value:?} on line {line}")]
    UnparsableFloat { line: usize, value: String },
    #[error("line {line} has {got} columns, expected {expected}")]
    RaggedRow {
        line: usize,
        got: usize,
        expected: usize,
    },
    #[error("no samples in input")]
    Empty,
}

/// Parse one whitespace-separated row of samples.
fn handle_line(number: usize, line: &str) -> Result<Vec<f64>, TextSourceError> {
    line.split_ascii_whitespace()
        .map(|part| {
            part.parse::<f64>()
                .map_err(|_| TextSourceError::UnparsableFloat {
                    line: number,
                    value: part.to_owned(),
                })
        })
        .collect()
}

/// Read a sample matrix: one line per row, whitespace-separated columns.
///
/// Blank lines and lines starting with `#` are skipped. A file holding a
/// single line yields a `1 x N` row vector.
pub fn read_matrix_from<R: BufRead>(reader: R) -> Result<Array2<f64>, TextSourceError> {
    let mut data = Vec::new();
    let mut width = None;
    let mut rows = 0;
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(TextSourceError::BadLineRead)?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let values = handle_line(i + 1, trimmed)?;
        let expected = *width.get_or_insert(values.len());
        if values.len() != expected {
            return Err(TextSourceError::RaggedRow {
                line: i + 1,
                got: values.len(),
                expected,
            });
        }
        data.extend(values);
        rows += 1;
    }
    let cols = width.ok_or(TextSourceError::Empty)?;
    Array2::from_shape_vec((rows, cols), data).map_err(|_| TextSourceError::Empty)
}

pub fn read_matrix(path: &Path) -> Result<Array2<f64>, TextSourceError> {
    let f = File::open(path).map_err(TextSourceError::FileOpenFailed)?;
    read_matrix_from(io::BufReader::new(f))
}
