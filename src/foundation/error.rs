/// Result alias used across the crate.
pub type RevealResult<T> = Result<T, RevealError>;

/// Errors raised while configuring or driving a reveal.
#[derive(thiserror::Error, Debug)]
pub enum RevealError {
    /// Invalid bounds, trigger syntax or target; the only class returned at setup.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A callback arrived after the target left the document.
    #[error("detached target: {0}")]
    DetachedTarget(String),

    /// The host cannot observe scrolling or measure layout.
    #[error("environment unavailable: {0}")]
    EnvironmentUnavailable(String),

    /// Page description (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other failure.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RevealError {
    /// Build a [`RevealError::Configuration`].
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`RevealError::DetachedTarget`].
    pub fn detached_target(msg: impl Into<String>) -> Self {
        Self::DetachedTarget(msg.into())
    }

    /// Build a [`RevealError::EnvironmentUnavailable`].
    pub fn environment_unavailable(msg: impl Into<String>) -> Self {
        Self::EnvironmentUnavailable(msg.into())
    }

    /// Build a [`RevealError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Configuration errors are the only class surfaced to callers at setup.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

impl From<serde_json::Error> for RevealError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
