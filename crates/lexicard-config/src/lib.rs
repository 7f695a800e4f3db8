use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use self::cache::CacheConfig;
use self::dictionary::{FreeDictConfig, OxfordConfig};
use self::network::NetworkConfig;
use self::pipeline::PipelineConfig;

pub mod cache;
pub mod dictionary;
pub mod network;
pub mod pipeline;

/// Definition sources that can take part in the resolver chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Oxford,
    FreeDict,
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "oxford" => Ok(ProviderKind::Oxford),
            "freedict" => Ok(ProviderKind::FreeDict),
            other => Err(format!("unknown provider '{other}'")),
        }
    }
}

fn default_providers() -> Vec<ProviderKind> {
    vec![ProviderKind::Oxford, ProviderKind::FreeDict]
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub cache: CacheConfig,
    pub network: NetworkConfig,
    pub oxford: OxfordConfig,
    pub freedict: FreeDictConfig,
    pub pipeline: PipelineConfig,

    /// Resolver chain order, fixed for the whole run
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderKind>,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let providers = env::var("LEXICARD_PROVIDERS")
            .ok()
            .and_then(|v| {
                v.split(',')
                    .map(ProviderKind::from_str)
                    .collect::<Result<Vec<_>, _>>()
                    .ok()
            })
            .unwrap_or_else(default_providers);

        let mut pipeline = PipelineConfig::default();
        if let Some(batch_size) = env::var("LEXICARD_BATCH_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            pipeline.batch_size = batch_size;
        }

        Config {
            cache: CacheConfig::new(),
            network: NetworkConfig::new(),
            oxford: OxfordConfig::new(),
            freedict: FreeDictConfig::default(),
            pipeline,
            providers,
        }
    }

    /// Providers in chain order without duplicates
    pub fn provider_order(&self) -> Vec<ProviderKind> {
        let mut order = Vec::with_capacity(self.providers.len());
        for kind in &self.providers {
            if !order.contains(kind) {
                order.push(*kind);
            }
        }
        order
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            network: NetworkConfig::default(),
            oxford: OxfordConfig::default(),
            freedict: FreeDictConfig::default(),
            pipeline: PipelineConfig::default(),
            providers: default_providers(),
        }
    }
}
