//! Pull a single candidate word out of a raw highlighted fragment.

use std::sync::LazyLock;

use regex::Regex;

use crate::preprocess::{DefaultPreprocessor, Preprocessor};

static NON_WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W+").unwrap());

/// Shorter runs (articles, "to", stray letters) are ignored
const MIN_WORD_CHARS: usize = 3;

/// The fragment's only word-character run of at least three characters.
///
/// Returns `None` when there is no such run or more than one, so phrases and
/// sentences are dropped rather than guessed at. Case is left unchanged.
pub fn extract(text: &str) -> Option<String> {
    extract_with(&DefaultPreprocessor, text)
}

pub fn extract_with(preprocessor: &impl Preprocessor, text: &str) -> Option<String> {
    let text = preprocessor.process(text);

    let mut runs = NON_WORD_RE
        .split(&text)
        .filter(|run| run.chars().count() >= MIN_WORD_CHARS);

    let word = runs.next()?;
    if runs.next().is_some() {
        return None;
    }

    Some(word.to_string())
}

/// Extract every row, keeping only rows that yield a word
pub fn extract_all<I, S>(rows: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut total = 0;
    let words: Vec<String> = rows
        .into_iter()
        .inspect(|_| total += 1)
        .filter_map(|row| extract(row.as_ref()))
        .collect();

    tracing::info!("{total} rows, {} words after cleaning", words.len());
    words
}
