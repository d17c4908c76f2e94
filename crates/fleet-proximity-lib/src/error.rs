use thiserror::Error;

/// Convenient result alias for the fleet proximity library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Every variant is a fault that aborts the current invocation. A lookup that
/// finds no record is not an error; see [`crate::store::Lookup`].
#[derive(Debug, Error)]
pub enum Error {
    /// A required configuration variable was absent or blank.
    #[error("required configuration variable {name} is not set")]
    MissingConfig { name: String },

    /// A record lacked an attribute the pipeline depends on.
    #[error("{entity} record is missing attribute '{attribute}'")]
    MissingAttribute {
        entity: &'static str,
        attribute: &'static str,
    },

    /// An attribute was present but could not be interpreted.
    #[error("{entity} record has invalid attribute '{attribute}': {message}")]
    InvalidAttribute {
        entity: &'static str,
        attribute: &'static str,
        message: String,
    },

    /// A keyed table lookup failed at the transport or service level.
    #[error("lookup against table {table} failed: {message}")]
    Lookup { table: String, message: String },

    /// Publishing an alert to the notification channel failed.
    #[error("publish to {topic} failed: {message}")]
    Publish { topic: String, message: String },

    /// Wrapper for alert serialization errors.
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn missing(entity: &'static str, attribute: &'static str) -> Self {
        Self::MissingAttribute { entity, attribute }
    }

    pub(crate) fn invalid(
        entity: &'static str,
        attribute: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            entity,
            attribute,
            message: message.into(),
        }
    }
}
