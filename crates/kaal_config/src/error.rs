//! Error types for configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from reading, parsing or validating a config file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value parsed but is out of range for its runtime type.
    #[error("invalid [{section}] config: {reason}")]
    Invalid {
        section: &'static str,
        reason: &'static str,
    },
}

impl ConfigError {
    pub(crate) fn invalid(section: &'static str) -> impl FnOnce(&'static str) -> Self {
        move |reason| Self::Invalid { section, reason }
    }
}
