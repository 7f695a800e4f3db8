use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;

/// Raw rows of the upstream highlight export, one fragment per line
pub async fn read_rows(path: &Path) -> anyhow::Result<Vec<String>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Can't read input {}", path.display()))?;

    Ok(text.lines().map(str::to_string).collect())
}

/// Known words, one per line; blank lines and `#` comments are ignored
pub async fn read_exclusions(path: &Path) -> anyhow::Result<HashSet<String>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Can't read exclusions {}", path.display()))?;

    let words: HashSet<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    tracing::info!("Loaded {} known words", words.len());
    Ok(words)
}
