use crate::antennas::{FrequencyMap, HarmonicAntinodeFinder};

/// Counts the unique antinode locations once resonant harmonics are accounted for.
#[tracing::instrument(skip(input))]
pub fn process(input: &str) -> miette::Result<String> {
    let map = FrequencyMap::parse(input)?;
    let antinodes = map.antinodes(&HarmonicAntinodeFinder);

    tracing::debug!(count = antinodes.len(), "collected antinodes");
    Ok(antinodes.len().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn test_process() -> miette::Result<()> {
        let input = "............
........0...
.....0......
.......0....
....0.......
......A.....
............
............
........A...
.........A..
............
............";
        assert_eq!("34", process(input)?);
        Ok(())
    }
}
