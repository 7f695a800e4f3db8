pub mod error;
pub mod fetch;
pub mod payload;

pub use error::{ProviderError, ProviderResult};
pub use fetch::{CachedFetcher, Fetched};
pub use payload::{MalformedPayload, Node};

use std::collections::HashSet;

use lexicard_types::DefinitionRecord;

/// Definition source interface
#[async_trait::async_trait]
pub trait DefinitionProvider: Send + Sync {
    /// Look up a word, consulting the cache before the network.
    ///
    /// `Err` is reserved for fatal conditions; everything that only
    /// concerns this word comes back as a `ProviderOutcome`.
    async fn resolve(&self, word: &str) -> ProviderResult<ProviderOutcome>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub cache_namespace: String,
    pub requires_credentials: bool,
}

/// Result of a single provider lookup
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutcome {
    Resolved(DefinitionRecord),
    NotFound,
    TransientFailure(String),
    MalformedPayload(String),
}

impl ProviderOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderOutcome::Resolved(_) => "resolved",
            ProviderOutcome::NotFound => "not found",
            ProviderOutcome::TransientFailure(_) => "transient failure",
            ProviderOutcome::MalformedPayload(_) => "malformed payload",
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, ProviderOutcome::Resolved(_))
    }
}

/// Lower-case form used for cache keys and requests
pub fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}

pub fn cache_key_for(word: &str) -> String {
    format!("word_{word}.json")
}

/// Drop repeated entries, keeping first-seen order
pub fn unique<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
