use lexicard_dictionary::ProviderError;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("No definitions resolved for any of {attempted} words")]
    NoDefinitionsResolved { attempted: usize },

    #[error(transparent)]
    CacheUnavailable(#[from] ProviderError),

    #[error("Deck writer failed on batch {index}: {detail}")]
    DeckWriter { index: usize, detail: String },

    #[error("Run cancelled after resolving {resolved} words")]
    Cancelled { resolved: usize },

    #[error("Resolver worker panicked: {0}")]
    WorkerPanicked(String),
}
