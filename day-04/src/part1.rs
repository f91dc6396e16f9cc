use crate::word_search::{Word, WordSearch};

/// Counts every XMAS in the grid, in any of the eight directions.
#[tracing::instrument(skip(input))]
pub fn process(input: &str) -> miette::Result<String> {
    let search = WordSearch::parse(input)?;
    let matches = search.find_word(&Word::flat("XMAS"));

    Ok(matches.len().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn test_process() -> miette::Result<()> {
        let input = "MMMSXXMASM
MSAMXMSMSA
AMXSXMAAMM
MSAMASMSMX
XMASAMXAMM
XXAMMXXAMA
SMSMSASXSS
SAXAMASAAA
MAMMMXMMMM
MXMXAXMASX";
        assert_eq!("18", process(input)?);
        Ok(())
    }
}
