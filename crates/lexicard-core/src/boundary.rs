//! Collaborators the pipeline calls out to but does not implement.

use async_trait::async_trait;
use lexicard_types::DefinitionRecord;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Maps a word to the form exclusion entries are stored in, e.g. its lemma
pub trait Normalizer: Send + Sync {
    fn normalize(&self, word: &str) -> String;
}

pub struct LowercaseNormalizer;

impl Normalizer for LowercaseNormalizer {
    fn normalize(&self, word: &str) -> String {
        word.trim().to_lowercase()
    }
}

/// Receives consecutive batches of resolved records
#[async_trait]
pub trait DeckWriter: Send + Sync {
    /// `index` starts at 1
    async fn write_batch(&self, index: usize, records: &[DefinitionRecord]) -> Result<(), BoxError>;
}

/// Best-effort extra data for resolved nouns (images, media)
#[async_trait]
pub trait Enricher: Send + Sync {
    async fn enrich(&self, record: &mut DefinitionRecord);
}
