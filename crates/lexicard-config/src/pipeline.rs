use serde::{Deserialize, Serialize};

fn default_concurrency() -> usize {
    1
}

fn default_shuffle() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct PipelineConfig {
    /// Records per deck batch, `<= 0` puts everything in one batch
    #[serde(default)]
    pub batch_size: i64,
    /// Words resolved at once, 1 keeps the sequential baseline
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
    pub shuffle_seed: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_size: 0,
            concurrency: default_concurrency(),
            shuffle: default_shuffle(),
            shuffle_seed: None,
        }
    }
}
