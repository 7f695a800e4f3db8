pub mod parser;
pub mod pronunciation;
pub mod provider;

#[cfg(test)]
mod test_data;

pub use parser::parse;
pub use pronunciation::{AudioGuess, PronunciationGuesser};
pub use provider::FreeDictProvider;
