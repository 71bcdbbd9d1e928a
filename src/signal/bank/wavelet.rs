//! Complex window generation for wavelet and short-time Fourier
//! decompositions.
//!
//! Each window is a complex exponential at its centre frequency under an
//! envelope: a Gaussian for Morlet wavelets, a Hanning taper otherwise.
//! Windows are centred on sample `len / 2`.
use std::f64::consts::PI;

use ndarray::{Array1, Array2, ArrayView1};
use sci_rs::na::Complex;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum BankError {
    #[error("no frequencies requested")]
    NoFrequencies,
    #[error("frequency {0} must be positive and finite")]
    InvalidFrequency(f64),
    #[error("frequency {freq} is above the Nyquist frequency {nyquist}")]
    AboveNyquist { freq: f64, nyquist: f64 },
    #[error("sample rate must be positive and finite")]
    InvalidSampleRate,
    #[error("cycle counts must be positive and finite")]
    InvalidCycles,
    #[error("cycles are given as one value or a min/max pair, got {0} values")]
    CycleSpec(usize),
    #[error("time support must be positive and finite")]
    InvalidTimeSupport,
    #[error("fixed window size must be at least one sample")]
    ZeroWindowSize,
    #[error("unknown window type {0:?}")]
    UnknownWindow(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WindowKind {
    #[default]
    Morlet,
    Hanning,
}

impl TryFrom<&str> for WindowKind {
    type Error = BankError;

    /// Only works for lowercase inputs.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let res = match value {
            "morlet" => Self::Morlet,
            "hanning" => Self::Hanning,
            _ => return Err(BankError::UnknownWindow(value.to_owned())),
        };
        Ok(res)
    }
}

/// Number of oscillations under each window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cycles {
    Fixed(f64),
    /// Linear from `min` at the first frequency to `max` at the last.
    Linear { min: f64, max: f64 },
}

impl Default for Cycles {
    fn default() -> Self {
        Cycles::Fixed(3.0)
    }
}

impl Cycles {
    /// Cycle count for frequency `index` of `count`.
    pub fn at(&self, index: usize, count: usize) -> f64 {
        match *self {
            Cycles::Fixed(c) => c,
            Cycles::Linear { min, .. } if count < 2 => min,
            Cycles::Linear { min, max } => {
                min + (max - min) * index as f64 / (count - 1) as f64
            }
        }
    }

    fn is_valid(&self) -> bool {
        let ok = |c: f64| c.is_finite() && c > 0.0;
        match *self {
            Cycles::Fixed(c) => ok(c),
            Cycles::Linear { min, max } => ok(min) && ok(max),
        }
    }
}

impl TryFrom<&[f64]> for Cycles {
    type Error = BankError;

    fn try_from(value: &[f64]) -> Result<Self, Self::Error> {
        match *value {
            [c] => Ok(Cycles::Fixed(c)),
            [min, max] => Ok(Cycles::Linear { min, max }),
            _ => Err(BankError::CycleSpec(value.len())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BankOptions {
    kind: WindowKind,
    cycles: Cycles,
    sample_rate: f64,
    winsize: Option<usize>,
    time_support: f64,
}

impl BankOptions {
    pub fn builder() -> BankOptionsBuilder {
        BankOptionsBuilder::new()
    }
}

impl Default for BankOptions {
    fn default() -> Self {
        BankOptionsBuilder::new().build_unchecked()
    }
}

#[derive(Default)]
pub struct BankOptionsBuilder {
    kind: Option<WindowKind>,
    cycles: Option<Cycles>,
    sample_rate: Option<f64>,
    winsize: Option<usize>,
    time_support: Option<f64>,
}

impl BankOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Window envelope. Default: Morlet.
    pub fn kind(mut self, kind: WindowKind) -> Self {
        self.kind.replace(kind);
        self
    }

    /// Cycles per window. Default: 3.
    pub fn cycles(mut self, cycles: Cycles) -> Self {
        self.cycles.replace(cycles);
        self
    }

    /// Interpret frequencies relative to this sample rate. Default: 1.
    pub fn sample_rate(mut self, hz: f64) -> Self {
        self.sample_rate.replace(hz);
        self
    }

    /// Centre every window in a fixed number of samples.
    pub fn winsize(mut self, samples: usize) -> Self {
        self.winsize.replace(samples);
        self
    }

    /// Morlet support, in standard deviations of the envelope. Default: 7.
    pub fn time_support(mut self, sigmas: f64) -> Self {
        self.time_support.replace(sigmas);
        self
    }

    /// Construct the options.
    pub fn build(self) -> Result<BankOptions, BankError> {
        let options = self.build_unchecked();
        if !(options.sample_rate.is_finite() && options.sample_rate > 0.0) {
            return Err(BankError::InvalidSampleRate);
        }
        if !options.cycles.is_valid() {
            return Err(BankError::InvalidCycles);
        }
        if !(options.time_support.is_finite() && options.time_support > 0.0) {
            return Err(BankError::InvalidTimeSupport);
        }
        if options.winsize == Some(0) {
            return Err(BankError::ZeroWindowSize);
        }
        Ok(options)
    }

    fn build_unchecked(self) -> BankOptions {
        BankOptions {
            kind: self.kind.unwrap_or_default(),
            cycles: self.cycles.unwrap_or_default(),
            sample_rate: self.sample_rate.unwrap_or(1.0),
            winsize: self.winsize,
            time_support: self.time_support.unwrap_or(7.0),
        }
    }
}

/// Generated windows, one per requested frequency.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterBank {
    /// Each window at its natural length.
    Variable(Vec<Array1<Complex<f64>>>),
    /// Windows as columns of a `winsize x nfreqs` matrix.
    Fixed(Array2<Complex<f64>>),
}

impl FilterBank {
    /// Number of windows.
    pub fn len(&self) -> usize {
        match self {
            FilterBank::Variable(windows) => windows.len(),
            FilterBank::Fixed(matrix) => matrix.ncols(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn window(&self, index: usize) -> Option<ArrayView1<'_, Complex<f64>>> {
        match self {
            FilterBank::Variable(windows) => windows.get(index).map(|w| w.view()),
            FilterBank::Fixed(matrix) => (index < matrix.ncols()).then(|| matrix.column(index)),
        }
    }
}

/// Build one complex window per frequency in `freqs`.
pub fn filter_bank(freqs: &[f64], options: &BankOptions) -> Result<FilterBank, BankError> {
    if freqs.is_empty() {
        return Err(BankError::NoFrequencies);
    }
    let srate = options.sample_rate;
    let nyquist = srate / 2.0;
    for &freq in freqs {
        if !(freq.is_finite() && freq > 0.0) {
            return Err(BankError::InvalidFrequency(freq));
        }
        if freq > nyquist {
            return Err(BankError::AboveNyquist { freq, nyquist });
        }
    }

    let count = freqs.len();
    let windows: Vec<Array1<Complex<f64>>> = freqs
        .iter()
        .enumerate()
        .map(|(i, &freq)| {
            let cycles = options.cycles.at(i, count);
            match options.kind {
                WindowKind::Morlet => morlet(freq, cycles, srate, options.time_support),
                WindowKind::Hanning => hanning(freq, cycles, srate),
            }
        })
        .collect();

    Ok(match options.winsize {
        None => FilterBank::Variable(windows),
        Some(winsize) => FilterBank::Fixed(fit_columns(&windows, winsize)),
    })
}

/// Gaussian-enveloped complex exponential, `σ = cycles / (2πf)`,
/// spanning `time_support` standard deviations.
fn morlet(freq: f64, cycles: f64, srate: f64, time_support: f64) -> Array1<Complex<f64>> {
    let sigma = cycles / (2.0 * PI * freq);
    let half = (time_support / 2.0 * sigma * srate).ceil() as i64;
    let amplitude = 1.0 / (sigma * PI.sqrt()).sqrt();
    (-half..=half)
        .map(|k| {
            let t = k as f64 / srate;
            let envelope = amplitude * (-t * t / (2.0 * sigma * sigma)).exp();
            phasor(envelope, 2.0 * PI * freq * t)
        })
        .collect()
}

/// Hanning-tapered complex exponential `cycles / f` seconds long, scaled
/// for unit gain at `freq`.
fn hanning(freq: f64, cycles: f64, srate: f64) -> Array1<Complex<f64>> {
    let mut len = (cycles * srate / freq).round() as usize;
    if len % 2 == 0 {
        len += 1;
    }
    let len = len.max(3);

    let taper: Vec<f64> = (0..len)
        .map(|k| 0.5 - 0.5 * (2.0 * PI * (k + 1) as f64 / (len + 1) as f64).cos())
        .collect();
    let total: f64 = taper.iter().sum();
    let mid = (len - 1) as f64 / 2.0;
    taper
        .iter()
        .enumerate()
        .map(|(k, &h)| {
            let t = (k as f64 - mid) / srate;
            phasor(h / total, 2.0 * PI * freq * t)
        })
        .collect()
}

/// `r·e^{jθ}` in rectangular form.
fn phasor(r: f64, theta: f64) -> Complex<f64> {
    Complex::new(r * theta.cos(), r * theta.sin())
}

/// Centre each window in a column of `winsize` samples, cutting both
/// ends of longer windows and zero-padding shorter ones.
fn fit_columns(windows: &[Array1<Complex<f64>>], winsize: usize) -> Array2<Complex<f64>> {
    let mut out = Array2::from_elem((winsize, windows.len()), Complex::new(0.0, 0.0));
    let target_mid = (winsize / 2) as i64;
    for (mut column, window) in out.columns_mut().into_iter().zip(windows) {
        let offset = (window.len() / 2) as i64 - target_mid;
        for (j, cell) in column.iter_mut().enumerate() {
            let src = j as i64 + offset;
            if src >= 0 && (src as usize) < window.len() {
                *cell = window[src as usize];
            }
        }
    }
    out
}
