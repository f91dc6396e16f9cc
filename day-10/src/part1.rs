use crate::topography::TopographicMap;

/// Sum of the scores of every trailhead.
#[tracing::instrument(skip(input))]
pub fn process(input: &str) -> miette::Result<String> {
    let map = TopographicMap::parse(input)?;

    Ok(map.total_score().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn test_process() -> miette::Result<()> {
        let input = "89010123
78121874
87430965
96549874
45678903
32019012
01329801
10456732";
        assert_eq!("36", process(input)?);
        Ok(())
    }
}
