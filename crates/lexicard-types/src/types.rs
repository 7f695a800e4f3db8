use std::fmt;

use serde::{Deserialize, Serialize};

/// Lexical category of a part explanation.
///
/// The set is closed: tags outside of it are rejected by the parsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Interjection,
    Preposition,
}

impl PartOfSpeech {
    /// Parse a provider tag such as `"noun"` or `"Adjective"`.
    ///
    /// `"adj"` is accepted as an alias for [`PartOfSpeech::Adjective`].
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_lowercase();
        match tag.as_str() {
            "noun" => Some(PartOfSpeech::Noun),
            "verb" => Some(PartOfSpeech::Verb),
            "adjective" | "adj" => Some(PartOfSpeech::Adjective),
            "adverb" => Some(PartOfSpeech::Adverb),
            "interjection" => Some(PartOfSpeech::Interjection),
            "preposition" => Some(PartOfSpeech::Preposition),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Adverb => "adverb",
            PartOfSpeech::Interjection => "interjection",
            PartOfSpeech::Preposition => "preposition",
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One meaning of a word within a part of speech
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sense {
    /// Never empty
    pub definitions: Vec<String>,
    pub synonyms: Vec<String>,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartExplanation {
    pub part_of_speech: PartOfSpeech,
    /// Never empty
    pub senses: Vec<Sense>,
}

/// Normalized lexical record for a single resolved word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionRecord {
    /// Lower-case form that was actually resolved
    pub word: String,
    /// May be empty when the provider has no phonetic data
    pub transcription: String,
    pub explanations: Vec<PartExplanation>,
    /// Playable pronunciation asset, if any was found
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

impl DefinitionRecord {
    pub fn has_part(&self, part: PartOfSpeech) -> bool {
        self.explanations.iter().any(|e| e.part_of_speech == part)
    }

    pub fn sense_count(&self) -> usize {
        self.explanations.iter().map(|e| e.senses.len()).sum()
    }
}
