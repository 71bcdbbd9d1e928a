use std::iter::Sum;

use ndarray::ScalarOperand;
use sci_rs::signal::filter::design::butter_dyn;
use sci_rs::signal::filter::design::BaFormatFilter;
use sci_rs::signal::filter::design::DigitalFilter;
use sci_rs::signal::filter::design::FilterBandType;
use sci_rs::signal::filter::design::FilterOutputType;
use thiserror::Error;

pub use num_traits::{Float, One, Zero};
pub use sci_rs::na::RealField;

#[derive(Error, Debug, PartialEq)]
pub enum DesignError {
    #[error("failed to create filter")]
    FilterFailure,
    #[error("filter order must be at least 1")]
    ZeroOrder,
    #[error("{band:?} filter needs {expected} cutoff frequencies, got {got}")]
    CutoffCount {
        band: Band,
        expected: usize,
        got: usize,
    },
    #[error("cutoff frequency must lie strictly between 0 and the Nyquist frequency")]
    CutoffOutOfRange,
    #[error("band edges must be increasing")]
    UnorderedBand,
    #[error("resonator quality factor must be positive")]
    QualityFactor,
    #[error("unknown band type {0:?}")]
    UnknownBand(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Band {
    #[default]
    LowPass,
    HighPass,
    BandPass,
    BandStop,
}

impl Band {
    /// Number of cutoff frequencies the band type is specified by.
    pub const fn edges(self) -> usize {
        match self {
            Band::LowPass | Band::HighPass => 1,
            Band::BandPass | Band::BandStop => 2,
        }
    }
}

impl From<Band> for FilterBandType {
    fn from(value: Band) -> Self {
        match value {
            Band::LowPass => FilterBandType::Lowpass,
            Band::HighPass => FilterBandType::Highpass,
            Band::BandPass => FilterBandType::Bandpass,
            Band::BandStop => FilterBandType::Bandstop,
        }
    }
}

impl TryFrom<&str> for Band {
    type Error = DesignError;

    /// Only works for lowercase inputs.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let res = match value {
            "lowpass" => Self::LowPass,
            "highpass" => Self::HighPass,
            "bandpass" => Self::BandPass,
            "bandstop" => Self::BandStop,
            _ => return Err(DesignError::UnknownBand(value.to_owned())),
        };
        Ok(res)
    }
}

/// Butterworth numerator/denominator coefficients.
///
/// `cutoff` is in the same unit as `sample_rate`; with a sample rate of
/// 2 the cutoffs are fractions of the Nyquist frequency.
pub fn butterworth<T>(
    order: usize,
    cutoff: &[T],
    band: Band,
    sample_rate: T,
) -> Result<(Vec<T>, Vec<T>), DesignError>
where
    T: RealField + Float + Copy + Sum + One + Zero + ScalarOperand,
{
    if order == 0 {
        return Err(DesignError::ZeroOrder);
    }
    if cutoff.len() != band.edges() {
        return Err(DesignError::CutoffCount {
            band,
            expected: band.edges(),
            got: cutoff.len(),
        });
    }
    let nyquist = sample_rate / (T::one() + T::one());
    if cutoff
        .iter()
        .any(|&f| !(f > T::zero() && f < nyquist))
    {
        return Err(DesignError::CutoffOutOfRange);
    }
    if cutoff.windows(2).any(|w| w[0] >= w[1]) {
        return Err(DesignError::UnorderedBand);
    }

    let filter = butter_dyn(
        order,
        cutoff.to_vec(),
        Some(band.into()),
        Some(false),
        Some(FilterOutputType::Ba),
        Some(sample_rate),
    );
    let DigitalFilter::Ba(BaFormatFilter { b, a }) = filter else {
        return Err(DesignError::FilterFailure);
    };
    Ok(trim_trailing_zeros(b, a))
}

/// Drop trailing positions where both `b` and `a` are zero.
///
/// `butter_dyn` pads its BA output past `order * edges + 1` taps; those
/// zeros would otherwise lengthen the delay line and the edge reflection.
fn trim_trailing_zeros<T>(mut b: Vec<T>, mut a: Vec<T>) -> (Vec<T>, Vec<T>)
where
    T: RealField + Float + Copy,
{
    let tap = |v: &[T], i: usize| v.get(i).copied().unwrap_or_else(T::zero);
    let mut n = b.len().max(a.len());
    while n > 1 && tap(&b, n - 1) == T::zero() && tap(&a, n - 1) == T::zero() {
        n -= 1;
    }
    b.truncate(n);
    a.truncate(n);
    (b, a)
}

/// Second-order band-pass resonator with 0 dB gain at `center`
/// (Audio EQ Cookbook "BPF, constant 0 dB peak gain").
pub fn resonator<T>(center: T, q: T, sample_rate: T) -> Result<(Vec<T>, Vec<T>), DesignError>
where
    T: RealField + Float + Copy + Sum + One + Zero + ScalarOperand,
{
    if !(q > T::zero()) {
        return Err(DesignError::QualityFactor);
    }
    let two = T::one() + T::one();
    if !(center > T::zero() && center < sample_rate / two) {
        return Err(DesignError::CutoffOutOfRange);
    }

    let w0 = two * T::pi() * center / sample_rate;
    let alpha = Float::sin(w0) / (two * q);
    let a0 = T::one() + alpha;

    let b = vec![alpha / a0, T::zero(), -alpha / a0];
    let a = vec![
        T::one(),
        -two * Float::cos(w0) / a0,
        (T::one() - alpha) / a0,
    ];
    Ok((b, a))
}
