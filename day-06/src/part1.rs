use crate::patrol;

/// Counts the distinct cells the guard covers before leaving the lab.
#[tracing::instrument(skip(input))]
pub fn process(input: &str) -> miette::Result<String> {
    let (map, guard) = patrol::parse(input)?;
    let visited = map.baseline(&guard)?;

    Ok(visited.distinct_locations().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process() -> miette::Result<()> {
        let input = "....#.....
.........#
..........
..#.......
.......#..
..........
.#..^.....
........#.
#.........
......#...";
        assert_eq!("41", process(input)?);
        Ok(())
    }
}
