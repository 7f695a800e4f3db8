use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_root() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join("lexicard")
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory holding one sub-directory per cache namespace
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

impl CacheConfig {
    pub fn new() -> Self {
        let root = env::var("LEXICARD_CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_root());

        Self { root }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
        }
    }
}
