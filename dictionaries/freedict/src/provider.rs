use std::time::Duration;

use async_trait::async_trait;
use lexicard_cache::CacheStore;
use lexicard_dictionary::{
    CachedFetcher, DefinitionProvider, ProviderMetadata, ProviderOutcome, ProviderResult,
    normalize_word,
};

use crate::parser;
use crate::pronunciation::{AudioGuess, DEFAULT_AUDIO_BASE_URL, PronunciationGuesser};

pub const DICT_NAME: &str = "freedict";
pub const DEFAULT_BASE_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";
/// Guessed audio URLs, an empty entry means nothing was found
pub const AUDIO_CACHE_NAME: &str = "freedict-audio";

fn audio_cache_key(word: &str) -> String {
    format!("word_{word}.txt")
}

/// dictionaryapi.dev, no credentials required
#[derive(Clone)]
pub struct FreeDictProvider {
    client: reqwest::Client,
    cache: CacheStore,
    fetcher: CachedFetcher,
    base_url: String,
    guesser: Option<PronunciationGuesser>,
}

impl FreeDictProvider {
    pub fn new(cache: CacheStore, timeout: Duration) -> ProviderResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("lexicard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            guesser: Some(PronunciationGuesser::new(
                client.clone(),
                DEFAULT_AUDIO_BASE_URL,
            )),
            client,
            fetcher: CachedFetcher::new(cache.clone(), DICT_NAME),
            cache,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Probe audio URLs under `base_url` when a payload has none
    pub fn with_audio_guessing(mut self, base_url: impl Into<String>) -> Self {
        self.guesser = Some(PronunciationGuesser::new(self.client.clone(), base_url));
        self
    }

    pub fn without_audio_guessing(mut self) -> Self {
        self.guesser = None;
        self
    }

    fn url_for(&self, word: &str) -> String {
        format!("{}/{word}", self.base_url.trim_end_matches('/'))
    }

    /// Cached guess for `word`, probing only when nothing is cached yet
    async fn guess_audio(
        &self,
        guesser: &PronunciationGuesser,
        word: &str,
    ) -> ProviderResult<Option<String>> {
        let key = audio_cache_key(word);

        if let Some(data) = self.cache.get(AUDIO_CACHE_NAME, &key).await? {
            tracing::debug!("Using cached pronunciation guess for '{word}'");
            let url = String::from_utf8_lossy(&data).trim().to_string();
            return Ok((!url.is_empty()).then_some(url));
        }

        match guesser.find(word).await {
            AudioGuess::Found(url) => {
                self.cache.put(AUDIO_CACHE_NAME, &key, url.as_bytes()).await?;
                Ok(Some(url))
            }
            AudioGuess::Absent => {
                self.cache.put(AUDIO_CACHE_NAME, &key, &[]).await?;
                Ok(None)
            }
            // Nothing learned, try again next run
            AudioGuess::Unreachable => Ok(None),
        }
    }
}

#[async_trait]
impl DefinitionProvider for FreeDictProvider {
    async fn resolve(&self, word: &str) -> ProviderResult<ProviderOutcome> {
        let word = normalize_word(word);
        let url = self.url_for(&word);
        tracing::debug!("Will use url {url} to get word '{word}' definition");

        let fetched = self.fetcher.fetch(&word, || self.client.get(&url)).await?;

        let mut outcome = fetched.into_outcome(|raw| parser::parse(&word, raw));
        match &mut outcome {
            ProviderOutcome::Resolved(record) if record.audio_url.is_none() => {
                if let Some(guesser) = &self.guesser {
                    record.audio_url = self.guess_audio(guesser, &word).await?;
                }
            }
            ProviderOutcome::MalformedPayload(detail) => {
                tracing::warn!("freedict entry for '{word}' is malformed: {detail}");
            }
            _ => {}
        }

        Ok(outcome)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Free Dictionary".to_string(),
            cache_namespace: DICT_NAME.to_string(),
            requires_credentials: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_data::{coax_response, example_response};
    use lexicard_dictionary::cache_key_for;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_provider(server: &MockServer) -> (FreeDictProvider, CacheStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let cache = CacheStore::new(temp_dir.path());
        let provider = FreeDictProvider::new(cache.clone(), Duration::from_secs(5))
            .unwrap()
            .with_base_url(format!("{}/entries/en/", server.uri()))
            .with_audio_guessing(format!("{}/mp3", server.uri()));
        (provider, cache, temp_dir)
    }

    #[tokio::test]
    async fn test_resolve_uses_payload_audio() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/entries/en/example"))
            .respond_with(ResponseTemplate::new(200).set_body_json(example_response()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let (provider, cache, _temp) = create_provider(&server);
        let outcome = provider.resolve("Example").await.unwrap();

        match outcome {
            ProviderOutcome::Resolved(record) => {
                assert_eq!(record.word, "example");
                assert_eq!(
                    record.audio_url.as_deref(),
                    Some("https://lex-audio.useremarkable.com/mp3/example_us_1.mp3")
                );
            }
            other => panic!("unexpected {other:?}"),
        }

        assert!(
            cache
                .get(DICT_NAME, &cache_key_for("example"))
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_resolve_guesses_missing_audio() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/entries/en/coax"))
            .respond_with(ResponseTemplate::new(200).set_body_json(coax_response()))
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/mp3/coax-us.mp3"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let (provider, _cache, _temp) = create_provider(&server);
        let outcome = provider.resolve("coax").await.unwrap();

        match outcome {
            ProviderOutcome::Resolved(record) => {
                assert_eq!(
                    record.audio_url,
                    Some(format!("{}/mp3/coax-us.mp3", server.uri()))
                );
                assert_eq!(record.explanations.len(), 2);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    async fn seed_coax(cache: &CacheStore) {
        cache
            .put(
                DICT_NAME,
                &cache_key_for("coax"),
                coax_response().to_string().as_bytes(),
            )
            .await
            .unwrap();
    }

    fn head_requests(requests: &[wiremock::Request]) -> usize {
        requests
            .iter()
            .filter(|r| r.method.as_str() == "HEAD")
            .count()
    }

    #[tokio::test]
    async fn test_guessed_audio_is_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(coax_response()))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/mp3/coax-us.mp3"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let (provider, cache, _temp) = create_provider(&server);
        seed_coax(&cache).await;

        let expected = format!("{}/mp3/coax-us.mp3", server.uri());
        for _ in 0..2 {
            match provider.resolve("coax").await.unwrap() {
                ProviderOutcome::Resolved(record) => {
                    assert_eq!(record.audio_url.as_deref(), Some(expected.as_str()));
                }
                other => panic!("unexpected {other:?}"),
            }
        }

        // three misses and the hit, all from the first resolve
        let requests = server.received_requests().await.unwrap();
        assert_eq!(head_requests(&requests), 4);
        assert_eq!(
            cache
                .get(AUDIO_CACHE_NAME, &audio_cache_key("coax"))
                .await
                .unwrap(),
            Some(expected.into_bytes())
        );
    }

    #[tokio::test]
    async fn test_missing_audio_is_cached_empty() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(404))
            .expect(7)
            .mount(&server)
            .await;

        let (provider, cache, _temp) = create_provider(&server);
        seed_coax(&cache).await;

        for _ in 0..2 {
            match provider.resolve("coax").await.unwrap() {
                ProviderOutcome::Resolved(record) => assert_eq!(record.audio_url, None),
                other => panic!("unexpected {other:?}"),
            }
        }

        assert_eq!(
            cache
                .get(AUDIO_CACHE_NAME, &audio_cache_key("coax"))
                .await
                .unwrap(),
            Some(Vec::new())
        );
    }

    #[tokio::test]
    async fn test_unreachable_audio_host_is_not_cached() {
        let server = MockServer::start().await;
        let (provider, cache, _temp) = create_provider(&server);
        let provider = provider.with_audio_guessing("http://127.0.0.1:9/mp3");
        seed_coax(&cache).await;

        match provider.resolve("coax").await.unwrap() {
            ProviderOutcome::Resolved(record) => assert_eq!(record.audio_url, None),
            other => panic!("unexpected {other:?}"),
        }

        assert!(
            cache
                .get(AUDIO_CACHE_NAME, &audio_cache_key("coax"))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_guessing_disabled() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/entries/en/coax"))
            .respond_with(ResponseTemplate::new(200).set_body_json(coax_response()))
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let (provider, _cache, _temp) = create_provider(&server);
        let provider = provider.without_audio_guessing();

        match provider.resolve("coax").await.unwrap() {
            ProviderOutcome::Resolved(record) => assert_eq!(record.audio_url, None),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_not_found() {
        let server = MockServer::start().await;
        Mock::given(path("/entries/en/qwzx"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "title": "No Definitions Found"
            })))
            .mount(&server)
            .await;

        let (provider, _cache, _temp) = create_provider(&server);
        assert_eq!(
            provider.resolve("qwzx").await.unwrap(),
            ProviderOutcome::NotFound
        );
    }

    #[tokio::test]
    async fn test_rate_limited_is_transient() {
        let server = MockServer::start().await;
        Mock::given(path("/entries/en/example"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let (provider, _cache, _temp) = create_provider(&server);
        let outcome = provider.resolve("example").await.unwrap();
        assert!(matches!(outcome, ProviderOutcome::TransientFailure(_)));
    }

    #[tokio::test]
    async fn test_unknown_part_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(path("/entries/en/and"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "meanings": [{"partOfSpeech": "conjunction", "definitions": [{"definition": "also"}]}]
            }])))
            .mount(&server)
            .await;

        let (provider, _cache, _temp) = create_provider(&server);
        let outcome = provider.resolve("and").await.unwrap();
        assert!(
            matches!(outcome, ProviderOutcome::MalformedPayload(ref d) if d.contains("conjunction"))
        );
    }

    #[tokio::test]
    async fn test_metadata() {
        let temp_dir = TempDir::new().unwrap();
        let provider =
            FreeDictProvider::new(CacheStore::new(temp_dir.path()), Duration::from_secs(1))
                .unwrap();

        let metadata = provider.metadata();
        assert_eq!(metadata.cache_namespace, "freedict");
        assert!(!metadata.requires_credentials);
        assert_eq!(
            provider.url_for("flatter"),
            "https://api.dictionaryapi.dev/api/v2/entries/en/flatter"
        );
    }
}
