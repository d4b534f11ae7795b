/// Convenience result type used across garland.
pub type GarlandResult<T> = Result<T, GarlandError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum GarlandError {
    /// Invalid configuration or caller-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A named image could not be read or decoded. Fatal for scene construction.
    #[error("asset error ({key}): {message}")]
    Asset {
        /// Asset key that failed.
        key: String,
        /// Underlying failure description.
        message: String,
    },

    /// Errors raised by a render sink.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GarlandError {
    /// Build a [`GarlandError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GarlandError::Asset`] value.
    pub fn asset(key: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Asset {
            key: key.into(),
            message: msg.into(),
        }
    }

    /// Build a [`GarlandError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`GarlandError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
