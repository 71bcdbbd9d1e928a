mod bank;
mod filter;
mod root;

pub use bank::BankConfig;
pub use filter::FilterConfig;
pub use root::{Config, ConfigurationError};
