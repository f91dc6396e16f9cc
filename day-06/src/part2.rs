use tracing::info;

use crate::patrol;

/// Counts the single-obstruction placements that trap the guard in a loop.
#[tracing::instrument(skip(input))]
pub fn process(input: &str) -> miette::Result<String> {
    let (map, guard) = patrol::parse(input)?;
    let obstructions = map.loop_obstructions(&guard)?;

    info!(count = obstructions.len(), "found loop-inducing obstructions");
    Ok(obstructions.len().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        "....#.....
.........#
..........
..#.......
.......#..
..........
.#..^.....
........#.
#.........
......#...",
        "6"
    )]
    #[case("..^..\n.....", "0")]
    fn test_process(#[case] input: &str, #[case] expected: &str) -> miette::Result<()> {
        assert_eq!(expected, process(input)?);
        Ok(())
    }

    #[test]
    fn test_guard_that_never_leaves() {
        // no exit, so there is no baseline route to search
        let input = ".#..
.>.#
#...
..#.";
        assert!(process(input).is_err());
    }
}
