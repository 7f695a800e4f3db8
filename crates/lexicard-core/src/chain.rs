use std::sync::Arc;

use lexicard_dictionary::{DefinitionProvider, ProviderOutcome, ProviderResult};
use lexicard_types::DefinitionRecord;

/// Result of running one word through every provider
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved {
        record: DefinitionRecord,
        provider: String,
    },
    /// Every provider declined; one entry per provider in chain order
    Unresolved { attempts: Vec<(String, ProviderOutcome)> },
}

impl Resolution {
    pub fn into_record(self) -> Option<DefinitionRecord> {
        match self {
            Resolution::Resolved { record, .. } => Some(record),
            Resolution::Unresolved { .. } => None,
        }
    }
}

/// Providers tried strictly in order, fixed for the whole run
#[derive(Clone)]
pub struct ResolverChain {
    providers: Vec<Arc<dyn DefinitionProvider>>,
}

impl std::fmt::Debug for ResolverChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverChain")
            .field("providers", &self.provider_names())
            .finish()
    }
}

impl ResolverChain {
    pub fn new(providers: Vec<Arc<dyn DefinitionProvider>>) -> Self {
        for provider in &providers {
            let metadata = provider.metadata();
            tracing::debug!(
                "{} caches under '{}', credentials {}",
                metadata.name,
                metadata.cache_namespace,
                if metadata.requires_credentials {
                    "required"
                } else {
                    "not required"
                }
            );
        }
        Self { providers }
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.metadata().name).collect()
    }

    /// First `Resolved` outcome wins.
    ///
    /// Per-word outcomes only advance the chain; `Err` means a provider hit
    /// a fatal condition and the run has to stop.
    pub async fn resolve(&self, word: &str) -> ProviderResult<Resolution> {
        let mut attempts = Vec::with_capacity(self.providers.len());

        for provider in &self.providers {
            let name = provider.metadata().name;

            match provider.resolve(word).await? {
                ProviderOutcome::Resolved(record) => {
                    tracing::debug!("'{word}' resolved by {name}");
                    return Ok(Resolution::Resolved {
                        record,
                        provider: name,
                    });
                }
                outcome => {
                    match &outcome {
                        ProviderOutcome::NotFound => {
                            tracing::warn!("{name}: no definition for '{word}'");
                        }
                        ProviderOutcome::TransientFailure(detail) => {
                            tracing::warn!("{name}: not able to get '{word}': {detail}");
                        }
                        ProviderOutcome::MalformedPayload(detail) => {
                            tracing::warn!("{name}: can't parse '{word}': {detail}");
                        }
                        ProviderOutcome::Resolved(_) => {}
                    }
                    attempts.push((name, outcome));
                }
            }
        }

        Ok(Resolution::Unresolved { attempts })
    }
}
