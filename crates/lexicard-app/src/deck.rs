use std::path::PathBuf;

use async_trait::async_trait;
use lexicard_core::{BoxError, DeckWriter};
use lexicard_types::DefinitionRecord;

/// Writes each batch as `<out_dir>/<deck_name>_<index>.json`
pub struct JsonDeckWriter {
    out_dir: PathBuf,
    deck_name: String,
}

impl JsonDeckWriter {
    pub fn new(out_dir: PathBuf, deck_name: String) -> Self {
        Self { out_dir, deck_name }
    }

    pub fn path_for(&self, index: usize) -> PathBuf {
        self.out_dir.join(format!("{}_{index}.json", self.deck_name))
    }
}

#[async_trait]
impl DeckWriter for JsonDeckWriter {
    async fn write_batch(&self, index: usize, records: &[DefinitionRecord]) -> Result<(), BoxError> {
        tokio::fs::create_dir_all(&self.out_dir).await?;

        let path = self.path_for(index);
        let data = serde_json::to_vec_pretty(records)?;
        tokio::fs::write(&path, data).await?;

        tracing::info!("Saved {} cards to {}", records.len(), path.display());
        Ok(())
    }
}
