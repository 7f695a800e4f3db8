//! Guess a pronunciation audio URL from well-known file naming conventions.

pub const DEFAULT_AUDIO_BASE_URL: &str = "https://audio.oxforddictionaries.com/en/mp3/";

/// Candidate file names, most likely first
static PATH_TEMPLATES: [&str; 7] = [
    "{word}__us_1.mp3",
    "{word}__us_2.mp3",
    "{word}__us_3.mp3",
    "{word}-us.mp3",
    "{word}.mp3",
    "{word}-au.mp3",
    "{word}-uk.mp3",
];

#[derive(Clone)]
pub struct PronunciationGuesser {
    client: reqwest::Client,
    base_url: String,
}

impl PronunciationGuesser {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Candidate URLs for `word`, built one at a time as the iterator advances.
    ///
    /// Each call starts over from the first template.
    pub fn candidates<'a>(&'a self, word: &'a str) -> impl Iterator<Item = String> + Clone + 'a {
        let base = self.base_url.trim_end_matches('/');
        PATH_TEMPLATES
            .iter()
            .map(move |template| format!("{base}/{}", template.replace("{word}", word)))
    }

    /// First candidate answering a `HEAD` request with a 2xx status.
    ///
    /// Probe errors count as absent, but when no candidate could be reached
    /// at all the result is `Unreachable` rather than `Absent`.
    pub async fn find(&self, word: &str) -> AudioGuess {
        let mut reachable = false;

        for url in self.candidates(word) {
            match self.probe(&url).await {
                Some(true) => {
                    tracing::debug!("Guessed pronunciation for '{word}': {url}");
                    return AudioGuess::Found(url);
                }
                Some(false) => reachable = true,
                None => {}
            }
        }

        tracing::debug!("No pronunciation found for '{word}'");
        if reachable {
            AudioGuess::Absent
        } else {
            AudioGuess::Unreachable
        }
    }

    /// `None` when the request itself failed
    async fn probe(&self, url: &str) -> Option<bool> {
        match self.client.head(url).send().await {
            Ok(response) => Some(response.status().is_success()),
            Err(e) => {
                tracing::debug!("Probe of {url} failed: {e}");
                None
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioGuess {
    Found(String),
    /// Every candidate answered, none with a 2xx
    Absent,
    /// No candidate could be reached at all
    Unreachable,
}
