use lexicard_cache::CacheStore;
use reqwest::{RequestBuilder, StatusCode};
use serde_json::Value;

use lexicard_types::DefinitionRecord;

use crate::error::ProviderResult;
use crate::payload::MalformedPayload;
use crate::{ProviderOutcome, cache_key_for};

/// Raw provider payload, or the reason there is none
#[derive(Debug)]
pub enum Fetched {
    Payload(Value),
    NotFound,
    Transient(String),
    Malformed(String),
}

impl Fetched {
    /// Map to a provider outcome, parsing the payload with `parse`
    pub fn into_outcome<P>(self, parse: P) -> ProviderOutcome
    where
        P: FnOnce(&Value) -> Result<DefinitionRecord, MalformedPayload>,
    {
        match self {
            Fetched::Payload(value) => match parse(&value) {
                Ok(record) => ProviderOutcome::Resolved(record),
                Err(e) => ProviderOutcome::MalformedPayload(e.to_string()),
            },
            Fetched::NotFound => ProviderOutcome::NotFound,
            Fetched::Transient(detail) => ProviderOutcome::TransientFailure(detail),
            Fetched::Malformed(detail) => ProviderOutcome::MalformedPayload(detail),
        }
    }
}

/// Cache-then-network lookup of one provider's raw JSON responses
#[derive(Clone)]
pub struct CachedFetcher {
    cache: CacheStore,
    namespace: String,
}

impl CachedFetcher {
    pub fn new(cache: CacheStore, namespace: impl Into<String>) -> Self {
        Self {
            cache,
            namespace: namespace.into(),
        }
    }

    /// Fetch the payload for an already normalized `word`.
    ///
    /// `request` is only built on a cache miss. Successful responses are
    /// cached as the exact bytes received before anything parses them.
    pub async fn fetch<F>(&self, word: &str, request: F) -> ProviderResult<Fetched>
    where
        F: FnOnce() -> RequestBuilder,
    {
        let key = cache_key_for(word);

        if let Some(data) = self.cache.get(&self.namespace, &key).await? {
            match serde_json::from_slice::<Value>(&data) {
                Ok(value) => {
                    tracing::debug!("Using cached {} response for '{word}'", self.namespace);
                    return Ok(Fetched::Payload(value));
                }
                Err(e) => {
                    tracing::warn!(
                        "Can't parse cached {} json for word '{word}', refetching: {e}",
                        self.namespace
                    );
                }
            }
        }

        let response = match request().send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return Ok(Fetched::Transient(format!("request timed out: {e}")));
            }
            Err(e) => return Ok(Fetched::Transient(format!("request failed: {e}"))),
        };

        let status = response.status();
        tracing::debug!("{} responded {status} for '{word}'", self.namespace);

        if status == StatusCode::NOT_FOUND {
            return Ok(Fetched::NotFound);
        }

        if !status.is_success() {
            return Ok(Fetched::Transient(format!("HTTP {status}")));
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => return Ok(Fetched::Transient(format!("failed to read body: {e}"))),
        };

        let value = match serde_json::from_slice::<Value>(&body) {
            Ok(value) => value,
            Err(e) => return Ok(Fetched::Malformed(format!("response is not JSON: {e}"))),
        };

        self.cache.put(&self.namespace, &key, &body).await?;
        tracing::info!("Got {} definition for word '{word}'", self.namespace);

        Ok(Fetched::Payload(value))
    }
}
