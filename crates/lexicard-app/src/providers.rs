use std::sync::Arc;

use anyhow::Context;
use lexicard_cache::CacheStore;
use lexicard_config::{Config, ProviderKind};
use lexicard_core::ResolverChain;
use lexicard_dict_freedict::FreeDictProvider;
use lexicard_dict_oxford::OxfordProvider;
use lexicard_dictionary::DefinitionProvider;

/// Providers in configured order, skipping disabled ones
pub fn build_chain(config: &Config, cache: CacheStore) -> anyhow::Result<ResolverChain> {
    let timeout = config.network.timeout();
    let mut providers: Vec<Arc<dyn DefinitionProvider>> = Vec::new();

    for kind in config.provider_order() {
        match kind {
            ProviderKind::Oxford => {
                let oxford = &config.oxford;
                if !oxford.enabled {
                    tracing::info!("Oxford Dictionaries disabled, skipping");
                    continue;
                }

                let provider = OxfordProvider::new(
                    oxford.app_id.clone(),
                    oxford.app_key.clone(),
                    cache.clone(),
                    timeout,
                )
                .context("Oxford Dictionaries needs OXFORD_APP_ID and OXFORD_APP_KEY")?
                .with_base_url(&oxford.base_url)
                .with_language(&oxford.language);

                providers.push(Arc::new(provider));
            }
            ProviderKind::FreeDict => {
                let freedict = &config.freedict;
                if !freedict.enabled {
                    tracing::info!("Free Dictionary disabled, skipping");
                    continue;
                }

                let provider = FreeDictProvider::new(cache.clone(), timeout)
                    .context("Failed to set up Free Dictionary")?
                    .with_base_url(&freedict.base_url);
                let provider = if freedict.guess_audio {
                    provider.with_audio_guessing(&freedict.audio_base_url)
                } else {
                    provider.without_audio_guessing()
                };

                providers.push(Arc::new(provider));
            }
        }
    }

    if providers.is_empty() {
        anyhow::bail!("No definition provider is enabled");
    }

    let chain = ResolverChain::new(providers);
    tracing::info!("Provider chain: {}", chain.provider_names().join(" -> "));
    Ok(chain)
}
