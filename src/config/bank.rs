use serde::Deserialize;

use crate::signal::{BankError, BankOptions, Cycles, WindowKind};

#[derive(Deserialize, Debug, Clone)]
pub struct BankConfig {
    /// Centre frequencies of the windows, in hertz.
    pub freqs: Vec<f64>,

    /// Cycles per window: one value, or a [min, max] pair spread
    /// linearly over `freqs`.
    /// Default: [3]
    #[serde(default = "default_cycles")]
    pub cycles: Vec<f64>,

    /// "morlet" or "hanning".
    /// Default: "morlet"
    #[serde(default = "default_window")]
    pub window: String,

    /// Sample rate, in hertz.
    /// Default: 1 (frequencies in cycles per sample).
    #[serde(default = "default_sample_rate")]
    pub sample_rate: f64,

    /// Centre every window in this many samples. When absent each window
    /// keeps its natural length.
    pub winsize: Option<usize>,

    /// Morlet support in envelope standard deviations.
    /// Default: 7
    #[serde(default = "default_time_support")]
    pub time_support: f64,
}

impl BankConfig {
    pub fn options(&self) -> Result<BankOptions, BankError> {
        let mut builder = BankOptions::builder()
            .kind(WindowKind::try_from(self.window.as_str())?)
            .cycles(Cycles::try_from(self.cycles.as_slice())?)
            .sample_rate(self.sample_rate)
            .time_support(self.time_support);
        if let Some(winsize) = self.winsize {
            builder = builder.winsize(winsize);
        }
        builder.build()
    }
}

fn default_cycles() -> Vec<f64> {
    vec![3.0]
}

fn default_window() -> String {
    "morlet".to_owned()
}

fn default_sample_rate() -> f64 {
    1.0
}

fn default_time_support() -> f64 {
    7.0
}
