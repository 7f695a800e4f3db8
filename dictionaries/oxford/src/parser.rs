//! Strict parser for Oxford Dictionaries `entries` responses.
//!
//! Fails on the first missing mandatory field. Optional enrichments
//! (synonyms, examples, audio) degrade to empty values instead.

use lexicard_dictionary::{MalformedPayload, Node, unique};
use lexicard_types::{DefinitionRecord, PartExplanation, PartOfSpeech, Sense};
use serde_json::Value;

pub const DIALECT: &str = "American English";
pub const PHONETIC_NOTATION: &str = "IPA";
const LANGUAGE: &str = "en";

pub fn parse(raw: &Value) -> Result<DefinitionRecord, MalformedPayload> {
    let root = Node::root(raw);

    let word = root.str_field("id")?.to_lowercase();
    let results = root.field("results")?.non_empty_items()?;
    let lexical_entries = results[0].field("lexicalEntries")?.non_empty_items()?;

    let transcription = find_transcription(&root, &results)?;

    let explanations = lexical_entries
        .iter()
        .map(parse_lexical_entry)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DefinitionRecord {
        word,
        transcription,
        explanations,
        audio_url: audio_url(raw),
    })
}

/// First American English pronunciation that links an audio file
pub fn audio_url(raw: &Value) -> Option<String> {
    let root = Node::root(raw);
    pronunciations(&root.opt_items("results"))
        .into_iter()
        .filter(|p| has_dialect(p, DIALECT))
        .find_map(|p| p.opt_str("audioFile").map(str::to_string))
}

fn find_transcription(root: &Node, results: &[Node]) -> Result<String, MalformedPayload> {
    pronunciations(results)
        .into_iter()
        .filter(|p| has_dialect(p, DIALECT))
        .filter(|p| p.opt_str("phoneticNotation") == Some(PHONETIC_NOTATION))
        .find_map(|p| p.opt_str("phoneticSpelling").map(str::to_string))
        .ok_or_else(|| {
            root.malformed(format!(
                "no {DIALECT} {PHONETIC_NOTATION} pronunciation in any entry"
            ))
        })
}

/// Every pronunciation under results -> lexicalEntries -> entries, in order
fn pronunciations<'a>(results: &[Node<'a>]) -> Vec<Node<'a>> {
    results
        .iter()
        .flat_map(|result| result.opt_items("lexicalEntries"))
        .flat_map(|lexical_entry| lexical_entry.opt_items("entries"))
        .flat_map(|entry| entry.opt_items("pronunciations"))
        .collect()
}

fn has_dialect(pronunciation: &Node, dialect: &str) -> bool {
    pronunciation
        .opt_items("dialects")
        .iter()
        .any(|d| d.value().as_str() == Some(dialect))
}

fn parse_lexical_entry(lexical_entry: &Node) -> Result<PartExplanation, MalformedPayload> {
    let category = lexical_entry.field("lexicalCategory")?.field("id")?;
    let tag = category.as_str()?;
    let part_of_speech = PartOfSpeech::from_tag(tag)
        .ok_or_else(|| category.malformed(format!("unknown part of speech '{tag}'")))?;

    let entries = lexical_entry.field("entries")?.non_empty_items()?;
    if entries.len() > 1 {
        tracing::info!(
            "{part_of_speech} definition has {} entries in lexicalEntries, using the first",
            entries.len()
        );
    }

    let senses = entries[0]
        .field("senses")?
        .non_empty_items()?
        .iter()
        .map(parse_sense)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PartExplanation {
        part_of_speech,
        senses,
    })
}

/// A sense needs `definitions`; synonyms and examples are optional.
///
/// Synonyms must be tagged `en`. Oxford examples usually carry no language
/// tag at all, so an untagged example counts as English and only an example
/// tagged with another language is dropped. Entries without `text` are skipped.
fn parse_sense(sense: &Node) -> Result<Sense, MalformedPayload> {
    let definitions = sense.field("definitions")?.strings()?;

    let synonyms = unique(
        sense
            .opt_items("synonyms")
            .iter()
            .filter(|s| s.opt_str("language") == Some(LANGUAGE))
            .filter_map(|s| s.opt_str("text"))
            .map(str::to_string),
    );
    if synonyms.is_empty() {
        tracing::debug!("No synonyms at {}", sense.path());
    }

    let examples: Vec<String> = sense
        .opt_items("examples")
        .iter()
        .filter(|e| matches!(e.opt_str("language"), None | Some(LANGUAGE)))
        .filter_map(|e| e.opt_str("text"))
        .map(str::to_string)
        .collect();
    if examples.is_empty() {
        tracing::debug!("No examples at {}", sense.path());
    }

    Ok(Sense {
        definitions,
        synonyms,
        examples,
    })
}
