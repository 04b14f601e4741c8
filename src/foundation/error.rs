/// Convenience result type used across sheetpack.
pub type SheetResult<T> = Result<T, SheetError>;

/// Top-level error taxonomy used by the conversion pipeline.
#[derive(thiserror::Error, Debug)]
pub enum SheetError {
    /// Input extension is not a recognized animated-image or video type.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A frame source failed to produce any frames.
    #[error("decode error: {0}")]
    Decode(String),

    /// Degenerate pipeline state (empty durations, mismatched sequence lengths, ...).
    #[error("input error: {0}")]
    Input(String),

    /// Invalid configuration values.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SheetError {
    /// Build a [`SheetError::UnsupportedFormat`] value.
    pub fn unsupported_format(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    /// Build a [`SheetError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`SheetError::Input`] value.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Build a [`SheetError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Coarse classification used in batch reports.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            Self::Decode(_) => ErrorKind::Decode,
            Self::Input(_) => ErrorKind::Input,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Other(_) => ErrorKind::Other,
        }
    }
}

/// Serializable counterpart of the [`SheetError`] variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// See [`SheetError::UnsupportedFormat`].
    UnsupportedFormat,
    /// See [`SheetError::Decode`].
    Decode,
    /// See [`SheetError::Input`].
    Input,
    /// See [`SheetError::Validation`].
    Validation,
    /// See [`SheetError::Other`].
    Other,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
