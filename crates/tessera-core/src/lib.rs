//! # tessera-core
//!
//! Configuration types shared across the Tessera crates.

pub mod config;
pub mod duration;

pub use config::{ConfigError, LoggingConfig, ServerConfig, TesseraConfig, TokenConfig};
pub use duration::{parse_duration, DurationParseError};
