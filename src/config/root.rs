use super::bank::BankConfig;
use super::filter::FilterConfig;

use config::{ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("configuration error")]
    ParseError(#[from] ConfigError),
}

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// The filter applied by the `filter` command.
    pub filter: Option<FilterConfig>,

    /// The windows generated by the `bank` command.
    pub bank: Option<BankConfig>,
}

impl Config {
    pub fn new(
        path: &Path,
        env_prefix: &str,
        env_separator: &str,
    ) -> Result<Self, ConfigurationError> {
        let config_file = File::from(path).format(FileFormat::Json);
        config::Config::builder()
            .add_source(config_file)
            .add_source(Environment::with_prefix(env_prefix).separator(env_separator))
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(|e| e.into())
    }
}
