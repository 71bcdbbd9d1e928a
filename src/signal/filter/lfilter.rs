extern crate alloc;

use alloc::vec::Vec;
use std::borrow::Borrow;

use thiserror::Error;

pub use num_traits::Float;
pub use sci_rs::na::RealField;

#[derive(Error, Debug, PartialEq)]
pub enum LFilterError {
    #[error("filter coefficients must not be empty")]
    EmptyCoefficients,
    #[error("leading denominator coefficient is zero")]
    ZeroLeadingDenominator,
    #[error("initial state has length {got}, filter needs {expected}")]
    StateLength { got: usize, expected: usize },
}

/// Numerator/denominator ("BA") filter in direct-form-II transposed
/// realization, together with its delay line.
///
/// Both coefficient vectors are zero-padded to a common length `n` and
/// divided by `a[0]`, so `a[0] == 1` afterwards. The delay line has
/// `n - 1` elements.
#[derive(Debug, Clone)]
pub struct Ba<F: RealField + Float + Copy> {
    /// Transfer coefficient numerator
    pub b: Vec<F>,
    /// Transfer coefficient denominator
    pub a: Vec<F>,

    /// Filter delay values
    pub zi: Vec<F>,
}

impl<F: RealField + Float + Copy> Ba<F> {
    pub fn new(b: &[F], a: &[F]) -> Result<Self, LFilterError> {
        let (b, a) = pad_coefficients(b, a)?;
        let a0 = a[0];
        if a0 == F::zero() {
            return Err(LFilterError::ZeroLeadingDenominator);
        }
        let b: Vec<F> = b.into_iter().map(|v| v / a0).collect();
        let a: Vec<F> = a.into_iter().map(|v| v / a0).collect();
        let zi = vec![F::zero(); b.len() - 1];
        Ok(Self { b, a, zi })
    }

    /// Replace the delay line.
    pub fn with_state(mut self, zi: &[F]) -> Result<Self, LFilterError> {
        self.set_state(zi)?;
        Ok(self)
    }

    pub fn set_state(&mut self, zi: &[F]) -> Result<(), LFilterError> {
        if zi.len() != self.zi.len() {
            return Err(LFilterError::StateLength {
                got: zi.len(),
                expected: self.zi.len(),
            });
        }
        self.zi.copy_from_slice(zi);
        Ok(())
    }

    /// Filter order plus one.
    pub fn len(&self) -> usize {
        self.b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.b.is_empty()
    }
}

/// Zero-pad the shorter of `b` and `a` at its tail so both have
/// `max(len(b), len(a))` elements.
pub fn pad_coefficients<F: Float>(b: &[F], a: &[F]) -> Result<(Vec<F>, Vec<F>), LFilterError> {
    if b.is_empty() || a.is_empty() {
        return Err(LFilterError::EmptyCoefficients);
    }
    let n = b.len().max(a.len());
    let pad = |v: &[F]| {
        let mut out = v.to_vec();
        out.resize(n, F::zero());
        out
    };
    Ok((pad(b), pad(a)))
}

///
/// Filter data through a numerator/denominator aka "BA" filter,
/// carrying the delay line in `ba` forward so that consecutive calls
/// continue where the previous one stopped.
///
pub fn lfilt_dyn<YI, F>(y: YI, ba: &mut Ba<F>) -> Vec<F>
where
    F: RealField + Float + Copy,
    YI: IntoIterator,
    YI::Item: Borrow<F>,
{
    let n = ba.b.len();
    y.into_iter()
        .map(|xi| {
            let x = *xi.borrow();
            if n == 1 {
                return ba.b[0] * x;
            }
            let out = ba.b[0] * x + ba.zi[0];
            for k in 0..n - 2 {
                ba.zi[k] = ba.b[k + 1] * x + ba.zi[k + 1] - ba.a[k + 1] * out;
            }
            ba.zi[n - 2] = ba.b[n - 1] * x - ba.a[n - 1] * out;
            out
        })
        .collect::<Vec<_>>()
}

/// One-shot filtering of `x` starting from delay line `zi`.
pub fn lfilter<F>(b: &[F], a: &[F], x: &[F], zi: &[F]) -> Result<Vec<F>, LFilterError>
where
    F: RealField + Float + Copy,
{
    let mut ba = Ba::new(b, a)?.with_state(zi)?;
    Ok(lfilt_dyn(x, &mut ba))
}
