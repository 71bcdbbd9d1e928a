use std::io::Write;

use ndarray::Array2;
use thiserror::Error;

use crate::signal::FilterBank;

#[derive(Error, Debug)]
pub enum DumpError {
    #[error("unable to write output")]
    Write(#[from] std::io::Error),
}

/// Write a sample matrix in the layout [`read_matrix`](super::read_matrix)
/// accepts.
pub fn write_matrix<W: Write>(out: &mut W, m: &Array2<f64>) -> Result<(), DumpError> {
    for row in m.rows() {
        let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        writeln!(out, "{}", line.join(" "))?;
    }
    Ok(())
}

/// Write complex windows as `re im` pairs.
///
/// A fixed bank is written one line per sample with one pair per window;
/// a variable bank as one `# freq=` block per window.
pub fn write_bank<W: Write>(out: &mut W, freqs: &[f64], bank: &FilterBank) -> Result<(), DumpError> {
    match bank {
        FilterBank::Fixed(matrix) => {
            let header: Vec<String> = freqs.iter().map(|f| format!("freq={f}")).collect();
            writeln!(out, "# {}", header.join(" "))?;
            for row in matrix.rows() {
                let line: Vec<String> = row.iter().map(|c| format!("{} {}", c.re, c.im)).collect();
                writeln!(out, "{}", line.join(" "))?;
            }
        }
        FilterBank::Variable(windows) => {
            for (freq, window) in freqs.iter().zip(windows) {
                writeln!(out, "# freq={freq} len={}", window.len())?;
                for c in window {
                    writeln!(out, "{} {}", c.re, c.im)?;
                }
            }
        }
    }
    Ok(())
}
