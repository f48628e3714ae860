//! Support code for the `qr-history` command-line front end.

mod config;
mod logging;

pub use config::{Config, ConfigError, HistoryConfig, LogFormat, LoggingConfig, StoreConfig};
pub use logging::{LoggingError, init as init_logging};
