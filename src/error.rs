use thiserror::Error;

/// Classifies release lookup/download errors for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseErrorKind {
    /// HTTP request failed (transport error or non-success status)
    RequestFailed,
    /// Response body could not be read or parsed
    InvalidResponse,
    /// Required asset missing from the release
    AssetNotFound,
}

/// Geosite conversion error types
#[derive(Error, Debug)]
pub enum GeositeError {
    #[error("Failed to decode GeoSite DAT: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("Release error: {message}")]
    Release {
        kind: ReleaseErrorKind,
        message: String,
    },

    #[error("Checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GeositeError {
    pub(crate) fn release(kind: ReleaseErrorKind, message: impl Into<String>) -> Self {
        GeositeError::Release {
            kind,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GeositeError>;
