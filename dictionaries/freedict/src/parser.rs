//! Lenient parser for dictionaryapi.dev responses.
//!
//! The payload is best-effort community data, so individual definitions
//! without text are skipped. Only an entry with nothing usable at all, or a
//! part of speech outside the closed set, is reported as malformed.

use lexicard_dictionary::{MalformedPayload, Node};
use lexicard_types::{DefinitionRecord, PartExplanation, PartOfSpeech, Sense};
use serde_json::Value;

pub fn parse(word: &str, raw: &Value) -> Result<DefinitionRecord, MalformedPayload> {
    let root = Node::root(raw);
    let entries = root.non_empty_items()?;
    let entry = &entries[0];

    let meanings = entry.field("meanings")?.non_empty_items()?;
    let mut explanations: Vec<PartExplanation> = Vec::new();

    for meaning in &meanings {
        let tag_node = meaning.field("partOfSpeech")?;
        let tag = tag_node.as_str()?;
        let part_of_speech = PartOfSpeech::from_tag(tag)
            .ok_or_else(|| tag_node.malformed(format!("unknown part of speech '{tag}'")))?;
        tracing::debug!("Found definition for part {part_of_speech}");

        let senses: Vec<Sense> = meaning
            .opt_items("definitions")
            .iter()
            .filter_map(parse_definition)
            .collect();

        if senses.is_empty() {
            tracing::debug!("No usable definitions at {}", meaning.path());
            continue;
        }

        match explanations
            .iter_mut()
            .find(|e| e.part_of_speech == part_of_speech)
        {
            Some(existing) => existing.senses.extend(senses),
            None => explanations.push(PartExplanation {
                part_of_speech,
                senses,
            }),
        }
    }

    if explanations.is_empty() {
        return Err(entry
            .field("meanings")?
            .malformed("no meaning carries a definition"));
    }

    let transcription = entry
        .opt_str("phonetic")
        .or_else(|| {
            entry
                .opt_items("phonetics")
                .iter()
                .find_map(|p| p.opt_str("text"))
        })
        .unwrap_or_default()
        .to_string();

    Ok(DefinitionRecord {
        word: word.to_string(),
        transcription,
        explanations,
        audio_url: audio_url(raw),
    })
}

/// First non-empty `phonetics[].audio` of the first entry
pub fn audio_url(raw: &Value) -> Option<String> {
    let root = Node::root(raw);
    let entries = root.items().ok()?;
    entries
        .first()?
        .opt_items("phonetics")
        .iter()
        .find_map(|p| p.opt_str("audio").map(str::to_string))
}

fn parse_definition(definition: &Node) -> Option<Sense> {
    let text = definition.opt_str("definition")?;

    let synonyms = definition
        .opt_items("synonyms")
        .iter()
        .filter_map(|s| s.value().as_str())
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .collect();

    let examples = definition
        .opt_str("example")
        .map(|e| vec![e.to_string()])
        .unwrap_or_default();

    Some(Sense {
        definitions: vec![text.to_string()],
        synonyms,
        examples,
    })
}
