use log::warn;
use serde::Deserialize;

use crate::signal::{butterworth, Band, DesignError};

#[derive(Deserialize, Debug, Clone)]
pub struct FilterConfig {
    /// Explicit numerator coefficients. When present the design fields
    /// below are ignored.
    pub b: Option<Vec<f64>>,

    /// Explicit denominator coefficients.
    /// Default: [1] (FIR) when only `b` is given.
    pub a: Option<Vec<f64>>,

    /// The order of the Butterworth filter to design.
    /// Default: 4
    #[serde(default = "default_filter_order")]
    pub order: usize,

    /// Cutoff frequencies, in the unit of `sample_rate`. One value for
    /// low/high-pass, two for band-pass/stop.
    #[serde(default)]
    pub cutoff: Vec<f64>,

    /// "lowpass", "highpass", "bandpass" or "bandstop".
    /// Default: "lowpass"
    #[serde(default = "default_band")]
    pub band: String,

    /// Sample rate the cutoffs refer to, in hertz.
    /// Default: 2 (cutoffs as fractions of Nyquist).
    #[serde(default = "default_sample_rate")]
    pub sample_rate: f64,
}

impl FilterConfig {
    /// Numerator and denominator for the configured filter.
    pub fn coefficients(&self) -> Result<(Vec<f64>, Vec<f64>), DesignError> {
        match (&self.b, &self.a) {
            (Some(b), a) => Ok((b.clone(), a.clone().unwrap_or_else(|| vec![1.0]))),
            (None, a) => {
                if a.is_some() {
                    warn!("denominator given without numerator, designing a Butterworth filter instead");
                }
                let band = Band::try_from(self.band.as_str())?;
                butterworth(self.order, &self.cutoff, band, self.sample_rate)
            }
        }
    }
}

fn default_filter_order() -> usize {
    4
}

fn default_band() -> String {
    "lowpass".to_owned()
}

fn default_sample_rate() -> f64 {
    2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_coefficients_win() {
        let c: FilterConfig =
            serde_json::from_str(r#"{"b": [0.5, 0.5], "order": 9, "cutoff": [0.2]}"#).expect("parse");
        assert_eq!(c.coefficients(), Ok((vec![0.5, 0.5], vec![1.0])));
    }

    #[test]
    fn designs_butterworth_by_default() {
        let c: FilterConfig = serde_json::from_str(r#"{"cutoff": [0.2]}"#).expect("parse");
        assert_eq!(c.order, 4);
        assert_eq!(c.band, "lowpass");
        let (b, a) = c.coefficients().expect("design");
        assert_eq!((b.len(), a.len()), (5, 5));
    }

    #[test]
    fn unknown_band_fails() {
        let c: FilterConfig =
            serde_json::from_str(r#"{"cutoff": [0.2], "band": "allpass"}"#).expect("parse");
        assert_eq!(
            c.coefficients(),
            Err(DesignError::UnknownBand("allpass".to_owned()))
        );
    }
}
