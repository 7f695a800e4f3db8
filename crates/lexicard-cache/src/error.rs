use std::path::PathBuf;

/// Storage-layer failure. Callers treat every variant as fatal.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache unavailable at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid cache {kind} '{value}'")]
    InvalidName { kind: &'static str, value: String },
}

pub type CacheResult<T> = Result<T, CacheError>;

impl CacheError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CacheError::Io {
            path: path.into(),
            source,
        }
    }
}
