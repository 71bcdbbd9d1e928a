use std::iter::Sum;

use log::{debug, warn};
use ndarray::{Array1, Array2, ArrayView1, ScalarOperand};
use rayon::prelude::*;
use thiserror::Error;

pub use num_traits::{Float, One, Zero};
pub use sci_rs::na::RealField;

use super::lfilter::{lfilt_dyn, Ba, LFilterError};

#[derive(Error, Debug, PartialEq)]
pub enum FiltFiltError {
    #[error("filtfilt takes exactly 3 arguments (b, a, x), got {0}")]
    Arguments(usize),
    #[error("coefficients must be a row or column vector, got a {0}x{1} matrix")]
    CoefficientShape(usize, usize),
    #[error("signal length {len} must exceed the reflection length {required}")]
    SignalTooShort { len: usize, required: usize },
    #[error("invalid filter coefficients")]
    Filter(#[from] LFilterError),
}

/// Forward/backward ("filtfilt") filter with odd reflection padding and
/// steady-state initial conditions.
///
/// Signal flow (per column of length `lx`)
///
/// 1. Mirror `3*(n-1)` samples about each end sample (odd symmetry).
/// 2. Filter forward, delay line seeded with `si * v[0]`.
/// 3. Reverse, filter again seeded with `si` times the new first sample,
///    reverse back.
/// 4. Keep the middle `lx` samples.
///
/// The result has zero phase distortion and the squared magnitude
/// response of `b/a`. Phase is only approximately corrected near the
/// edges.
#[derive(Debug, Clone)]
pub struct ZeroPhaseFilter<T>
where
    T: RealField + Float + Copy + Sum + One + Zero + ScalarOperand,
{
    /// Normalized coefficients with a zeroed delay line.
    taps: Ba<T>,
    /// Steady-state seed, `n - 1` long.
    si: Vec<T>,
    /// Samples mirrored at each edge.
    lrefl: usize,
}

impl<T> ZeroPhaseFilter<T>
where
    T: RealField + Float + Copy + Sum + One + Zero + ScalarOperand + Send + Sync,
{
    pub fn builder() -> ZeroPhaseFilterBuilder<T> {
        ZeroPhaseFilterBuilder::new()
    }

    /// Number of samples mirrored at each edge of a column.
    pub fn reflection_len(&self) -> usize {
        self.lrefl
    }

    /// Steady-state delay line for a unit constant input.
    pub fn seed(&self) -> &[T] {
        &self.si
    }

    /// Filter every column of `x` independently.
    ///
    /// A single-row matrix is a row vector: it is filtered as one column
    /// and the result is returned as a row again.
    pub fn apply(&self, x: &Array2<T>) -> Result<Array2<T>, FiltFiltError> {
        let rotate = x.nrows() == 1;
        let data = if rotate { x.t() } else { x.view() };
        let (lx, n_cols) = data.dim();
        self.check_length(lx)?;

        let columns = (0..n_cols)
            .into_par_iter()
            .map(|c| self.apply_column(data.column(c)))
            .collect::<Result<Vec<_>, FiltFiltError>>()?;

        let mut y = Array2::<T>::zeros((lx, n_cols));
        for (c, column) in columns.iter().enumerate() {
            y.column_mut(c).assign(column);
        }
        Ok(if rotate { y.reversed_axes() } else { y })
    }

    /// Filter a single column.
    pub fn apply_column(&self, x: ArrayView1<T>) -> Result<Array1<T>, FiltFiltError> {
        let lx = x.len();
        self.check_length(lx)?;

        let v = reflect_pad(x, self.lrefl);

        let mut forward = self.taps.clone();
        forward.set_state(&self.scaled_seed(v[0]))?;
        let mut y = lfilt_dyn(&v, &mut forward);
        y.reverse();

        let mut backward = self.taps.clone();
        backward.set_state(&self.scaled_seed(y[0]))?;
        let mut y = lfilt_dyn(&y, &mut backward);
        y.reverse();

        Ok(Array1::from_iter(y.into_iter().skip(self.lrefl).take(lx)))
    }

    fn check_length(&self, lx: usize) -> Result<(), FiltFiltError> {
        if lx <= self.lrefl {
            return Err(FiltFiltError::SignalTooShort {
                len: lx,
                required: self.lrefl,
            });
        }
        Ok(())
    }

    fn scaled_seed(&self, level: T) -> Vec<T> {
        self.si.iter().map(|&s| s * level).collect()
    }
}

pub struct ZeroPhaseFilterBuilder<T> {
    b: Option<Vec<T>>,
    a: Option<Vec<T>>,
}

impl<T> Default for ZeroPhaseFilterBuilder<T>
where
    T: RealField + Float + Copy + Sum + One + Zero + ScalarOperand + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ZeroPhaseFilterBuilder<T>
where
    T: RealField + Float + Copy + Sum + One + Zero + ScalarOperand + Send + Sync,
{
    pub fn new() -> Self {
        Self { b: None, a: None }
    }

    /// Transfer function numerator. Default: `[1]`.
    pub fn numerator(mut self, b: &[T]) -> Self {
        self.b.replace(b.to_vec());
        self
    }

    /// Transfer function denominator. Default: `[1]`.
    pub fn denominator(mut self, a: &[T]) -> Self {
        self.a.replace(a.to_vec());
        self
    }

    /// Construct the filter, computing its steady-state seed once.
    pub fn build(self) -> Result<ZeroPhaseFilter<T>, FiltFiltError> {
        let b = self.b.unwrap_or_else(|| vec![T::one()]);
        let a = self.a.unwrap_or_else(|| vec![T::one()]);
        let taps = Ba::new(&b, &a)?;
        let si = steady_state_seed(&taps.b, &taps.a);
        let lrefl = 3 * (taps.len() - 1);
        debug!(
            "zero-phase filter of order {}, reflecting {} samples per edge",
            taps.len() - 1,
            lrefl
        );
        Ok(ZeroPhaseFilter { taps, si, lrefl })
    }
}

/// Likhterov–Kopeika steady-state delay line for a direct-form-II
/// transposed filter fed with a unit constant.
///
/// `si[k] = Σ_{j>k} (b[j] - kdc·a[j])` with `kdc = Σb / Σa`. Coefficients
/// are zero-padded to a common length; the recursion in
/// [`lfilt_dyn`] expects them divided by `a[0]` beforehand. When the DC
/// gain is not finite (e.g. `Σa == 0`) the seed is all zeros.
pub fn steady_state_seed<T>(b: &[T], a: &[T]) -> Vec<T>
where
    T: RealField + Float + Copy + Sum,
{
    let n = b.len().max(a.len());
    if n == 0 {
        return Vec::new();
    }
    let coef = |v: &[T], i: usize| v.get(i).copied().unwrap_or_else(T::zero);

    let kdc = b.iter().copied().sum::<T>() / a.iter().copied().sum::<T>();
    if !Float::is_finite(kdc) {
        warn!("DC gain is not finite, starting from a zero delay line");
        return vec![T::zero(); n - 1];
    }

    let mut si = vec![T::zero(); n - 1];
    let mut acc = T::zero();
    for i in (1..n).rev() {
        acc = acc + (coef(b, i) - kdc * coef(a, i));
        si[i - 1] = acc;
    }
    si
}

/// Odd reflection of `lrefl` samples about each end of `x`.
///
/// Left:  `2*x[0] - x[i]`      for i = lrefl ..= 1
/// Right: `2*x[-1] - x[-1-i]`  for i = 1 ..= lrefl
///
/// `x` must be longer than `lrefl`.
fn reflect_pad<T>(x: ArrayView1<T>, lrefl: usize) -> Vec<T>
where
    T: Float,
{
    let lx = x.len();
    let two = T::one() + T::one();
    let first = x[0];
    let last = x[lx - 1];

    let mut out = Vec::with_capacity(lx + 2 * lrefl);
    out.extend((1..=lrefl).rev().map(|i| two * first - x[i]));
    out.extend(x.iter().copied());
    out.extend((1..=lrefl).map(|i| two * last - x[lx - 1 - i]));
    out
}

/// Zero-phase filter every column of `x` with `b/a`.
pub fn filtfilt<T>(b: &[T], a: &[T], x: &Array2<T>) -> Result<Array2<T>, FiltFiltError>
where
    T: RealField + Float + Copy + Sum + One + Zero + ScalarOperand + Send + Sync,
{
    ZeroPhaseFilter::builder()
        .numerator(b)
        .denominator(a)
        .build()?
        .apply(x)
}

/// Zero-phase filter a single 1-D signal with `b/a`.
pub fn filtfilt_1d<T>(b: &[T], a: &[T], x: &Array1<T>) -> Result<Array1<T>, FiltFiltError>
where
    T: RealField + Float + Copy + Sum + One + Zero + ScalarOperand + Send + Sync,
{
    ZeroPhaseFilter::builder()
        .numerator(b)
        .denominator(a)
        .build()?
        .apply_column(x.view())
}
