use lexicard_cache::CacheError;

/// Provider failures that must stop the whole run.
///
/// Per-word problems are reported through `ProviderOutcome` instead.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error(transparent)]
    CacheUnavailable(#[from] CacheError),

    #[error("Provider {provider} requires credentials")]
    MissingCredentials { provider: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub type ProviderResult<T> = Result<T, ProviderError>;
