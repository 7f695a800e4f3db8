use std::env;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_oxford_url() -> String {
    "https://od-api.oxforddictionaries.com:443/api/v2/entries/".to_string()
}

fn default_oxford_language() -> String {
    "en-us".to_string()
}

fn default_freedict_url() -> String {
    "https://api.dictionaryapi.dev/api/v2/entries/en/".to_string()
}

fn default_audio_base_url() -> String {
    "https://audio.oxforddictionaries.com/en/mp3/".to_string()
}

/// Credentialed Oxford Dictionaries API
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OxfordConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub app_id: String,
    #[serde(default)]
    pub app_key: String,
    #[serde(default = "default_oxford_url")]
    pub base_url: String,
    #[serde(default = "default_oxford_language")]
    pub language: String,
}

impl OxfordConfig {
    pub fn new() -> Self {
        Self::default().with_env_credentials()
    }

    /// Fill credentials that are still empty from `OXFORD_APP_ID` / `OXFORD_APP_KEY`
    pub fn with_env_credentials(mut self) -> Self {
        if self.app_id.is_empty() {
            self.app_id = env::var("OXFORD_APP_ID").unwrap_or_default();
        }
        if self.app_key.is_empty() {
            self.app_key = env::var("OXFORD_APP_KEY").unwrap_or_default();
        }
        self
    }

    pub fn has_credentials(&self) -> bool {
        !self.app_id.trim().is_empty() && !self.app_key.trim().is_empty()
    }
}

impl Default for OxfordConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            app_id: String::new(),
            app_key: String::new(),
            base_url: default_oxford_url(),
            language: default_oxford_language(),
        }
    }
}

/// Credential-free dictionaryapi.dev
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct FreeDictConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_freedict_url")]
    pub base_url: String,
    /// Probe well-known audio URLs when the payload carries none
    #[serde(default = "default_enabled")]
    pub guess_audio: bool,
    #[serde(default = "default_audio_base_url")]
    pub audio_base_url: String,
}

impl Default for FreeDictConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            base_url: default_freedict_url(),
            guess_audio: default_enabled(),
            audio_base_url: default_audio_base_url(),
        }
    }
}
