use std::collections::HashMap;
use std::fmt;

use miette::{Diagnostic, SourceSpan};
use nom::{
    character::complete::{multispace0, space1, u64 as unsigned},
    combinator::all_consuming,
    multi::separated_list1,
    sequence::{preceded, terminated},
    IResult,
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Diagnostic)]
pub enum StoneError {
    #[error("Failed to parse stones")]
    #[diagnostic(
        code(day11::parse_error),
        help("Stones are non-negative integers separated by spaces")
    )]
    InvalidFormat {
        #[source_code]
        src: String,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("Stone {0} overflowed when multiplied by 2024")]
    #[diagnostic(code(day11::overflow))]
    Overflow(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Stone(u64);

/// What a single stone turns into after one blink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blinked {
    One(Stone),
    Two(Stone, Stone),
}

impl Stone {
    pub const fn new(engraving: u64) -> Self {
        Self(engraving)
    }

    pub fn engraving(&self) -> u64 {
        self.0
    }

    /// Applies the first matching rule: zero becomes one, an even number of
    /// digits splits in half, anything else is multiplied by 2024.
    pub fn blink(self) -> Result<Blinked, StoneError> {
        if self.0 == 0 {
            return Ok(Blinked::One(Stone(1)));
        }

        let digits = self.0.ilog10() + 1;
        if digits % 2 == 0 {
            let half = 10u64.pow(digits / 2);
            return Ok(Blinked::Two(Stone(self.0 / half), Stone(self.0 % half)));
        }

        self.0
            .checked_mul(2024)
            .map(|engraving| Blinked::One(Stone(engraving)))
            .ok_or(StoneError::Overflow(self.0))
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One blink over an explicit row of stones, order preserved.
pub fn blink(stones: &[Stone]) -> Result<Vec<Stone>, StoneError> {
    let mut next = Vec::with_capacity(stones.len() * 2);
    for stone in stones {
        match stone.blink()? {
            Blinked::One(stone) => next.push(stone),
            Blinked::Two(left, right) => next.extend([left, right]),
        }
    }
    Ok(next)
}

/// One blink over a multiset of stones. Order never affects the count, so
/// equal stones are only transformed once.
pub fn blink_counts(stones: &HashMap<Stone, u64>) -> Result<HashMap<Stone, u64>, StoneError> {
    let mut next = HashMap::with_capacity(stones.len());
    for (&stone, &count) in stones {
        match stone.blink()? {
            Blinked::One(stone) => *next.entry(stone).or_default() += count,
            Blinked::Two(left, right) => {
                *next.entry(left).or_default() += count;
                *next.entry(right).or_default() += count;
            }
        }
    }
    Ok(next)
}

/// Number of stones after `blinks` blinks, tracked as a multiset.
pub fn count_after(stones: &[Stone], blinks: usize) -> Result<u64, StoneError> {
    let mut counts: HashMap<Stone, u64> = HashMap::new();
    for &stone in stones {
        *counts.entry(stone).or_default() += 1;
    }

    for blink in 1..=blinks {
        counts = blink_counts(&counts)?;
        debug!(blink, distinct = counts.len(), "blinked");
    }

    Ok(counts.values().sum())
}

// region: nom parser
fn stones(input: &str) -> IResult<&str, Vec<Stone>> {
    let (input, engravings) = all_consuming(terminated(
        preceded(multispace0, separated_list1(space1, unsigned)),
        multispace0,
    ))(input)?;
    Ok((input, engravings.into_iter().map(Stone).collect()))
}
// endregion

pub fn parse(input: &str) -> Result<Vec<Stone>, StoneError> {
    stones(input).map(|(_, stones)| stones).map_err(|e| {
        let offset = match e {
            nom::Err::Error(e) | nom::Err::Failure(e) => input.len() - e.input.len(),
            nom::Err::Incomplete(_) => input.len(),
        };
        StoneError::InvalidFormat {
            src: input.to_string(),
            span: (offset, usize::from(offset < input.len())).into(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rstest::rstest;

    fn engraved(stones: &[Stone]) -> String {
        stones.iter().join(" ")
    }

    #[rstest]
    #[case(0, Blinked::One(Stone(1)))]
    #[case(1, Blinked::One(Stone(2024)))]
    #[case(10, Blinked::Two(Stone(1), Stone(0)))]
    #[case(99, Blinked::Two(Stone(9), Stone(9)))]
    #[case(1000, Blinked::Two(Stone(10), Stone(0)))]
    #[case(999, Blinked::One(Stone(2021976)))]
    fn test_stone_blink(#[case] engraving: u64, #[case] expected: Blinked) -> miette::Result<()> {
        assert_eq!(expected, Stone::new(engraving).blink()?);
        Ok(())
    }

    #[test]
    fn test_overflow() {
        assert!(matches!(
            Stone::new(u64::MAX / 1000).blink(),
            Err(StoneError::Overflow(_))
        ));
    }

    #[test]
    fn test_blink_sequence() -> miette::Result<()> {
        let expected = [
            "253000 1 7",
            "253 0 2024 14168",
            "512072 1 20 24 28676032",
            "512 72 2024 2 0 2 4 2867 6032",
            "1036288 7 2 20 24 4048 1 4048 8096 28 67 60 32",
            "2097446912 14168 4048 2 0 2 4 40 48 2024 40 48 80 96 2 8 6 7 6 0 3 2",
        ];

        let mut stones = parse("125 17")?;
        for row in expected {
            stones = blink(&stones)?;
            assert_eq!(row, engraved(&stones));
        }
        assert_eq!(22, stones.len());
        Ok(())
    }

    #[test]
    fn test_blink_single_step() -> miette::Result<()> {
        let stones = parse("0 1 10 99 999")?;
        assert_eq!("1 2024 1 0 9 9 2021976", engraved(&blink(&stones)?));
        Ok(())
    }

    #[rstest]
    #[case(6, 22)]
    #[case(25, 55312)]
    fn test_count_after(#[case] blinks: usize, #[case] expected: u64) -> miette::Result<()> {
        let stones = parse("125 17")?;
        assert_eq!(expected, count_after(&stones, blinks)?);
        Ok(())
    }

    #[test]
    fn test_parse_invalid() {
        let err = parse("125 x7").unwrap_err();
        assert!(matches!(
            err,
            StoneError::InvalidFormat { span, .. } if span == SourceSpan::from((4, 1))
        ));
    }
}
