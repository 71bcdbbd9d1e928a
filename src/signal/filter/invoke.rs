use std::iter::Sum;

use ndarray::{Array2, ScalarOperand};

pub use num_traits::{Float, One, Zero};
pub use sci_rs::na::RealField;

use super::filtfilt::{filtfilt, FiltFiltError};

/// Positional call surface: `call(&[b, a, x])`.
///
/// Exactly three operands are accepted. `b` and `a` may be given as row
/// (`1 x n`) or column (`n x 1`) matrices; both read as the same ordered
/// coefficient list. `x` keeps its orientation (see
/// [`ZeroPhaseFilter::apply`](super::filtfilt::ZeroPhaseFilter::apply)).
pub fn call<T>(args: &[Array2<T>]) -> Result<Array2<T>, FiltFiltError>
where
    T: RealField + Float + Copy + Sum + One + Zero + ScalarOperand + Send + Sync,
{
    let [b, a, x] = args else {
        return Err(FiltFiltError::Arguments(args.len()));
    };
    let b = coefficient_vector(b)?;
    let a = coefficient_vector(a)?;
    filtfilt(&b, &a, x)
}

fn coefficient_vector<T: Copy>(m: &Array2<T>) -> Result<Vec<T>, FiltFiltError> {
    match m.dim() {
        (1, _) | (_, 1) => Ok(m.iter().copied().collect()),
        (rows, cols) => Err(FiltFiltError::CoefficientShape(rows, cols)),
    }
}
