//! Error types for the Tadau client.

/// Errors that can occur when using the Tadau client.
///
/// Only [`Error::Config`] is ever returned from the public API (at build
/// time). The remaining variants are absorbed inside `send_events` and
/// surfaced through logging, so a bad event or a flaky network never
/// interrupts the host application.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Config file could not be read.
    #[error("failed to read config file: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// Config file could not be parsed.
    #[error("failed to parse config file: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Collect endpoint returned something other than 204.
    #[error("collect endpoint returned HTTP {0}, expected 204")]
    Delivery(reqwest::StatusCode),
}
