use thiserror::Error;

/// Errors raised while loading a [`SceneConfig`](super::config::SceneConfig).
///
/// Nothing in the per-frame path returns an error; this is the only
/// fallible surface of the crate.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("invalid scene config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field parsed but holds a value the scene cannot run with.
    #[error("invalid scene config field `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
