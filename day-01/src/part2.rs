use crate::locations::LocationLists;

#[tracing::instrument(skip(input))]
pub fn process(input: &str) -> miette::Result<String> {
    let lists = LocationLists::parse(input)?;

    Ok(lists.similarity_score()?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process() -> miette::Result<()> {
        let input = "3   4
4   3
2   5
1   3
3   9
3   3";
        assert_eq!("31", process(input)?);
        Ok(())
    }

    #[test]
    fn test_process_no_matches() -> miette::Result<()> {
        assert_eq!("0", process("1   2\n3   4")?);
        Ok(())
    }
}
