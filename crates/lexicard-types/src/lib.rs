pub mod types;

pub use types::{DefinitionRecord, PartExplanation, PartOfSpeech, Sense};
