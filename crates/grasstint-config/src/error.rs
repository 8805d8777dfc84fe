//! Configuration error types.

/// Errors that can occur when loading, saving, or parsing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write the config file to disk.
    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),
}

/// Errors returned by the typed getters on [`SiteNode`](crate::SiteNode).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// The key is not present in the node.
    #[error("missing value `{0}`")]
    Missing(String),

    /// The key is present but its text does not parse as the requested type.
    #[error("invalid value for `{key}`: {text:?}")]
    Invalid {
        /// Key that was looked up.
        key: String,
        /// Raw text stored under the key.
        text: String,
    },
}
