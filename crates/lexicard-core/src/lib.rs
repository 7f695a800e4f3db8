pub mod boundary;
pub mod chain;
pub mod error;
pub mod extractor;
pub mod pipeline;
pub mod preprocess;


pub use boundary::{BoxError, DeckWriter, Enricher, LowercaseNormalizer, Normalizer};
pub use chain::{Resolution, ResolverChain};
pub use error::PipelineError;
pub use extractor::{extract, extract_all};
pub use pipeline::{Pipeline, PipelineOptions, RunReport};
