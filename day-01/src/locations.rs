use itertools::Itertools;
use miette::Diagnostic;
use nom::{
    character::complete::{i64 as signed, space1},
    combinator::all_consuming,
    sequence::separated_pair,
    IResult,
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum LocationError {
    #[error("Input cannot be zero")]
    #[diagnostic(code(day1::zero))]
    InputCannotBeZero,

    #[error("Input cannot be negative: {0}")]
    #[diagnostic(code(day1::negative))]
    InputCannotBeNegative(i64),

    #[error("Invalid input format on line {line}")]
    #[diagnostic(
        code(day1::invalid_format),
        help("Each line must be two numbers separated by at least one space")
    )]
    InvalidInputFormat { line: usize },

    #[error("Total overflowed")]
    #[diagnostic(code(day1::overflow), help("Location ids are too large to total"))]
    Overflow,
}

/// A historically significant location, always a positive id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationId(u64);

impl LocationId {
    pub fn get(self) -> u64 {
        self.0
    }

    pub fn distance(self, other: Self) -> u64 {
        self.0.abs_diff(other.0)
    }
}

impl TryFrom<i64> for LocationId {
    type Error = LocationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Err(LocationError::InputCannotBeZero),
            v if v < 0 => Err(LocationError::InputCannotBeNegative(v)),
            v => Ok(Self(v.unsigned_abs())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocationLists {
    left: Vec<LocationId>,
    right: Vec<LocationId>,
}

fn parse_line(input: &str) -> IResult<&str, (i64, i64)> {
    all_consuming(separated_pair(signed, space1, signed))(input)
}

impl LocationLists {
    pub fn parse(input: &str) -> Result<Self, LocationError> {
        let mut lists = Self::default();

        for (idx, line) in input.lines().enumerate() {
            let (_, (left, right)) = parse_line(line.trim())
                .map_err(|_| LocationError::InvalidInputFormat { line: idx + 1 })?;

            lists.left.push(LocationId::try_from(left)?);
            lists.right.push(LocationId::try_from(right)?);
        }

        debug!(pairs = lists.left.len(), "parsed location lists");
        Ok(lists)
    }

    /// Pairs the smallest left with the smallest right, and so on.
    pub fn total_distance(&self) -> Result<u64, LocationError> {
        let left = self.left.iter().sorted_unstable();
        let right = self.right.iter().sorted_unstable();

        left.zip(right)
            .try_fold(0_u64, |acc, (l, r)| acc.checked_add(l.distance(*r)))
            .ok_or(LocationError::Overflow)
    }

    /// Each left id weighted by how often it appears on the right.
    pub fn similarity_score(&self) -> Result<u64, LocationError> {
        let counts = self.right.iter().counts();

        self.left
            .iter()
            .try_fold(0_u64, |acc, id| {
                let count = counts.get(id).copied().unwrap_or_default() as u64;
                id.get()
                    .checked_mul(count)
                    .and_then(|score| acc.checked_add(score))
            })
            .ok_or(LocationError::Overflow)
    }
}
