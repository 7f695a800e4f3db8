use std::time::Duration;

use async_trait::async_trait;
use lexicard_cache::CacheStore;
use lexicard_dictionary::{
    CachedFetcher, DefinitionProvider, ProviderError, ProviderMetadata, ProviderOutcome,
    ProviderResult, normalize_word,
};

use crate::parser;

pub const DICT_NAME: &str = "oxforddictionaries";
pub const DEFAULT_BASE_URL: &str = "https://od-api.oxforddictionaries.com:443/api/v2/entries";
pub const DEFAULT_LANGUAGE: &str = "en-us";

#[derive(Clone)]
pub struct OxfordProvider {
    client: reqwest::Client,
    fetcher: CachedFetcher,
    app_id: String,
    app_key: String,
    base_url: String,
    language: String,
}

impl OxfordProvider {
    pub fn new(
        app_id: String,
        app_key: String,
        cache: CacheStore,
        timeout: Duration,
    ) -> ProviderResult<Self> {
        if app_id.trim().is_empty() || app_key.trim().is_empty() {
            return Err(ProviderError::MissingCredentials {
                provider: DICT_NAME.to_string(),
            });
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("lexicard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            fetcher: CachedFetcher::new(cache, DICT_NAME),
            app_id,
            app_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    fn url_for(&self, word: &str) -> String {
        format!(
            "{}/{}/{word}",
            self.base_url.trim_end_matches('/'),
            self.language
        )
    }
}

#[async_trait]
impl DefinitionProvider for OxfordProvider {
    async fn resolve(&self, word: &str) -> ProviderResult<ProviderOutcome> {
        let word = normalize_word(word);
        let url = self.url_for(&word);

        let fetched = self
            .fetcher
            .fetch(&word, || {
                self.client
                    .get(&url)
                    .header("app_id", &self.app_id)
                    .header("app_key", &self.app_key)
            })
            .await?;

        let outcome = fetched.into_outcome(parser::parse);
        if let ProviderOutcome::MalformedPayload(detail) = &outcome {
            tracing::warn!("Oxford entry for '{word}' is malformed: {detail}");
        }
        Ok(outcome)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Oxford Dictionaries".to_string(),
            cache_namespace: DICT_NAME.to_string(),
            requires_credentials: true,
        }
    }
}
