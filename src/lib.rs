//! Zero-phase IIR filtering and complex filter-bank generation.
//!
//! [`filtfilt`] runs a numerator/denominator filter forward and then
//! backward over each column of a sample matrix, mirroring the signal at
//! both ends and starting each pass from a steady-state delay line so
//! that edges do not ring. [`filter_bank`] builds Morlet or
//! Hanning-tapered complex windows for wavelet / short-time Fourier
//! analysis.
//!
//! ```
//! use ndarray::Array2;
//! use zerophase::{butterworth, filtfilt, Band};
//!
//! let (b, a) = butterworth(3, &[0.1], Band::LowPass, 2.0).unwrap();
//! let x = Array2::from_shape_fn((200, 2), |(i, c)| ((i * (c + 3)) % 11) as f64);
//! let y = filtfilt(&b, &a, &x).unwrap();
//! assert_eq!(y.dim(), x.dim());
//! ```
pub mod config;
pub mod datasource;
pub mod signal;

pub use signal::{
    butterworth, call, filter_bank, filtfilt, filtfilt_1d, lfilter, resonator, steady_state_seed,
    Band, BankOptions, Cycles, FiltFiltError, FilterBank, WindowKind, ZeroPhaseFilter,
};
