mod bank;
mod filter;

pub use bank::wavelet::{
    filter_bank, BankError, BankOptions, BankOptionsBuilder, Cycles, FilterBank, WindowKind,
};
pub use filter::design::{butterworth, resonator, Band, DesignError};
pub use filter::filtfilt::{
    filtfilt, filtfilt_1d, steady_state_seed, FiltFiltError, ZeroPhaseFilter,
    ZeroPhaseFilterBuilder,
};
pub use filter::invoke::call;
pub use filter::lfilter::{lfilt_dyn, lfilter, pad_coefficients, Ba, LFilterError};
