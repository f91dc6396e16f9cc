use crate::word_search::{Word, WordSearch};

/// Counts the MAS pairs crossing in an X.
#[tracing::instrument(skip(input))]
pub fn process(input: &str) -> miette::Result<String> {
    let search = WordSearch::parse(input)?;
    let matches = search.find_word(&Word::crossed("MAS"));

    Ok(matches.len().to_string())
}
