//! Orchestrates a run: clean the word list, resolve each word through the
//! provider chain, then hand the records to a deck writer in batches.
//!
//! Resolution is sequential by default. With `concurrency > 1` a fixed pool
//! of workers pulls `(position, word)` jobs from a bounded channel and the
//! results are put back in position order before batching, so both modes
//! produce the same batches for the same shuffle.

use std::collections::HashSet;
use std::sync::Arc;

use lexicard_dictionary::{ProviderError, unique};
use lexicard_types::{DefinitionRecord, PartOfSpeech};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::boundary::{DeckWriter, Enricher, LowercaseNormalizer, Normalizer};
use crate::chain::{Resolution, ResolverChain};
use crate::error::PipelineError;

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Records per batch, `<= 0` means a single batch
    pub batch_size: i64,
    pub concurrency: usize,
    pub shuffle: bool,
    pub shuffle_seed: Option<u64>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            batch_size: 0,
            concurrency: 1,
            shuffle: true,
            shuffle_seed: None,
        }
    }
}

/// Counts reported at the end of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub unique_words: usize,
    pub excluded: usize,
    pub attempted: usize,
    pub resolved: usize,
    pub batches: usize,
}

pub struct Pipeline {
    chain: ResolverChain,
    normalizer: Arc<dyn Normalizer>,
    enricher: Option<Arc<dyn Enricher>>,
    options: PipelineOptions,
    cancel: CancellationToken,
}

impl Pipeline {
    pub fn new(chain: ResolverChain) -> Self {
        Self {
            chain,
            normalizer: Arc::new(LowercaseNormalizer),
            enricher: None,
            options: PipelineOptions::default(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_normalizer(mut self, normalizer: Arc<dyn Normalizer>) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_enricher(mut self, enricher: Arc<dyn Enricher>) -> Self {
        self.enricher = Some(enricher);
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub async fn run(
        &self,
        words: &[String],
        exclude: &HashSet<String>,
        writer: &dyn DeckWriter,
    ) -> Result<RunReport, PipelineError> {
        let words = dedup(words);
        let unique_words = words.len();

        let exclude: HashSet<String> = exclude
            .iter()
            .map(|w| self.normalizer.normalize(w))
            .collect();
        let mut words = filter_excluded(words, &exclude, self.normalizer.as_ref());
        let excluded = unique_words - words.len();
        tracing::info!(
            "{} words to resolve, {excluded} already known",
            words.len()
        );

        if self.options.shuffle {
            shuffle(&mut words, self.options.shuffle_seed);
        }

        let attempted = words.len();
        let mut records = if self.options.concurrency > 1 {
            self.resolve_concurrent(words).await?
        } else {
            self.resolve_sequential(&words).await?
        };

        tracing::info!("Resolved {} of {attempted} words", records.len());
        if records.is_empty() {
            return Err(PipelineError::NoDefinitionsResolved { attempted });
        }

        if let Some(enricher) = &self.enricher {
            for record in records
                .iter_mut()
                .filter(|r| r.has_part(PartOfSpeech::Noun))
            {
                enricher.enrich(record).await;
            }
        }

        let resolved = records.len();
        let batches = partition(records, self.options.batch_size);
        let batch_count = batches.len();

        for (i, batch) in batches.iter().enumerate() {
            let index = i + 1;
            tracing::debug!("Writing batch {index} with {} records", batch.len());
            writer
                .write_batch(index, batch)
                .await
                .map_err(|e| PipelineError::DeckWriter {
                    index,
                    detail: e.to_string(),
                })?;
        }

        Ok(RunReport {
            unique_words,
            excluded,
            attempted,
            resolved,
            batches: batch_count,
        })
    }

    async fn resolve_sequential(
        &self,
        words: &[String],
    ) -> Result<Vec<DefinitionRecord>, PipelineError> {
        let mut records = Vec::new();

        for word in words {
            if self.cancel.is_cancelled() {
                return Err(PipelineError::Cancelled {
                    resolved: records.len(),
                });
            }

            if let Some(record) = resolve_one(&self.chain, word).await? {
                records.push(record);
            }
        }

        Ok(records)
    }

    async fn resolve_concurrent(
        &self,
        words: Vec<String>,
    ) -> Result<Vec<DefinitionRecord>, PipelineError> {
        let workers = self.options.concurrency.min(words.len()).max(1);
        tracing::debug!("Resolving with {workers} workers");

        // `None` tells a worker the queue is drained
        let (job_tx, job_rx) = kanal::bounded_async::<Option<(usize, String)>>(workers * 2);

        // Stops workers and the feeder on a fatal error without marking the run cancelled
        let halt = self.cancel.child_token();

        let mut tasks = JoinSet::new();
        for _ in 0..workers {
            let rx = job_rx.clone();
            let chain = self.chain.clone();
            let halt = halt.clone();

            tasks.spawn(async move {
                let mut resolved = Vec::new();
                while let Ok(Some((position, word))) = rx.recv().await {
                    if halt.is_cancelled() {
                        break;
                    }
                    match resolve_one(&chain, &word).await {
                        Ok(Some(record)) => resolved.push((position, record)),
                        Ok(None) => {}
                        Err(e) => {
                            halt.cancel();
                            return Err(e);
                        }
                    }
                }
                Ok::<_, ProviderError>(resolved)
            });
        }
        drop(job_rx);

        for job in words.into_iter().enumerate() {
            if halt.is_cancelled() || job_tx.send(Some(job)).await.is_err() {
                break;
            }
        }
        for _ in 0..workers {
            if job_tx.send(None).await.is_err() {
                break;
            }
        }
        drop(job_tx);

        let mut resolved = Vec::new();
        let mut fatal = None;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(part)) => resolved.extend(part),
                Ok(Err(e)) => {
                    fatal.get_or_insert(PipelineError::from(e));
                }
                Err(e) => {
                    halt.cancel();
                    fatal.get_or_insert(PipelineError::WorkerPanicked(e.to_string()));
                }
            }
        }

        if let Some(e) = fatal {
            return Err(e);
        }
        if self.cancel.is_cancelled() {
            return Err(PipelineError::Cancelled {
                resolved: resolved.len(),
            });
        }

        resolved.sort_by_key(|(position, _)| *position);
        Ok(resolved.into_iter().map(|(_, record)| record).collect())
    }
}

async fn resolve_one(
    chain: &ResolverChain,
    word: &str,
) -> Result<Option<DefinitionRecord>, ProviderError> {
    match chain.resolve(word).await? {
        Resolution::Resolved { record, provider } => {
            tracing::info!(
                "Got {} senses for '{word}' from {provider}",
                record.sense_count()
            );
            Ok(Some(record))
        }
        Resolution::Unresolved { attempts } => {
            let reasons: Vec<String> = attempts
                .iter()
                .map(|(provider, outcome)| format!("{provider}: {}", outcome.kind()))
                .collect();
            tracing::warn!("Skipping '{word}' ({})", reasons.join(", "));
            Ok(None)
        }
    }
}

/// Lower-case, trim and drop repeats, keeping first-seen order
pub fn dedup(words: &[String]) -> Vec<String> {
    unique(
        words
            .iter()
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty()),
    )
}

/// Drop words whose normalized form is in `exclude`
pub fn filter_excluded(
    words: Vec<String>,
    exclude: &HashSet<String>,
    normalizer: &dyn Normalizer,
) -> Vec<String> {
    words
        .into_iter()
        .filter(|word| {
            let known = exclude.contains(&normalizer.normalize(word));
            if known {
                tracing::debug!("Excluding known word '{word}'");
            }
            !known
        })
        .collect()
}

/// Randomize order so decks are not clustered alphabetically
pub fn shuffle(words: &mut [String], seed: Option<u64>) {
    match seed {
        Some(seed) => words.shuffle(&mut StdRng::seed_from_u64(seed)),
        None => words.shuffle(&mut rand::thread_rng()),
    }
}

/// Consecutive batches of at most `batch_size` items, one batch when `batch_size <= 0`
pub fn partition<T>(items: Vec<T>, batch_size: i64) -> Vec<Vec<T>> {
    if items.is_empty() {
        return Vec::new();
    }
    if batch_size <= 0 {
        return vec![items];
    }

    let size = usize::try_from(batch_size).unwrap_or(usize::MAX);
    let mut batches = Vec::with_capacity(items.len().div_ceil(size));
    let mut items = items.into_iter().peekable();
    while items.peek().is_some() {
        batches.push(items.by_ref().take(size).collect());
    }
    batches
}
