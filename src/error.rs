use std::{error::Error, sync::Arc};

pub type GfxResult<T> = Result<T, GfxError>;

/// Generic error that contains all the different kinds of errors that may
/// occur when using the API
#[derive(Debug, Clone)]
pub enum GfxError {
    StringError(String),
    IoError(Arc<std::io::Error>),
    /// A requested feature is not available on the active backend. Factory
    /// calls surface this instead of panicking.
    CapabilityUnsupported(String),
    /// The dense-ID allocator for the named resource category has no IDs
    /// left.
    IdSpaceExhausted(&'static str),
}

impl std::fmt::Display for GfxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StringError(msg) => write!(f, "{}", msg),
            Self::IoError(e) => e.fmt(f),
            Self::CapabilityUnsupported(what) => {
                write!(f, "capability not supported by the active backend: {}", what)
            }
            Self::IdSpaceExhausted(category) => {
                write!(f, "dense ID space exhausted for category {}", category)
            }
        }
    }
}

impl Error for GfxError {}

impl From<&str> for GfxError {
    fn from(str: &str) -> Self {
        Self::StringError(str.to_string())
    }
}

impl From<String> for GfxError {
    fn from(string: String) -> Self {
        Self::StringError(string)
    }
}

impl From<std::io::Error> for GfxError {
    fn from(error: std::io::Error) -> Self {
        Self::IoError(Arc::new(error))
    }
}
