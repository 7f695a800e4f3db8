pub mod parser;
pub mod provider;

#[cfg(test)]
mod test_data;

pub use parser::{audio_url, parse};
pub use provider::OxfordProvider;
