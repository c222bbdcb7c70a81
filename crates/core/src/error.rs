/// Result alias that carries the custom [`VisualiserError`] type.
pub type Result<T> = std::result::Result<T, VisualiserError>;

/// Common error type for the core crate.
///
/// Run-level outcomes (cancelled runs, a declined search prompt, nothing
/// selected) are not errors; they are reported through
/// [`RunStatus`](crate::RunStatus). This type covers configuration and
/// command problems only.
#[derive(Debug, thiserror::Error)]
pub enum VisualiserError {
    /// Free-form message for failures without a dedicated variant.
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// The configuration file could not be parsed or failed validation.
    #[error("configuration error: {0}")]
    Config(String),
    #[error("dataset size {size} is outside 1..={max}")]
    InvalidSize { size: usize, max: usize },
    #[error("speed {0} is outside 1..=100")]
    InvalidSpeed(u32),
    #[error("unknown algorithm `{0}`")]
    UnknownAlgorithm(String),
    #[error("unknown category `{0}`")]
    UnknownCategory(String),
    /// A textual command could not be parsed.
    #[error("invalid command: {0}")]
    InvalidCommand(String),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl VisualiserError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}

impl From<&str> for VisualiserError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for VisualiserError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}

impl From<toml::de::Error> for VisualiserError {
    fn from(value: toml::de::Error) -> Self {
        Self::Config(value.to_string())
    }
}
