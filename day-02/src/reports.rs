use miette::Diagnostic;
use nom::{
    character::complete::{i64 as signed, space1},
    combinator::all_consuming,
    multi::separated_list1,
    IResult,
};
use thiserror::Error;
use tracing::debug;

const MAX_STEP: u64 = 3;

#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum ReportError {
    #[error("Input cannot be zero")]
    #[diagnostic(code(day2::zero))]
    InputCannotBeZero,

    #[error("Input cannot be negative: {0}")]
    #[diagnostic(code(day2::negative))]
    InputCannotBeNegative(i64),

    #[error("Invalid format on line {line}")]
    #[diagnostic(
        code(day2::invalid_format),
        help("Each line should be levels separated by spaces")
    )]
    InvalidFormat { line: usize },
}

/// Why a report is not safe.
#[derive(Debug, Error, Diagnostic, PartialEq, Eq, Clone, Copy)]
pub enum UnsafeReason {
    #[error("Report is empty")]
    ReportIsEmpty,
    #[error("Levels increased by more than 3")]
    IncreasedByMoreThanThree,
    #[error("Levels decreased by more than 3")]
    DecreasedByMoreThanThree,
    #[error("Levels are increasing and decreasing")]
    IncreasingAndDecreasing,
    #[error("Levels are neither increasing nor decreasing")]
    NeitherIncreasingNorDecreasing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slope {
    Increasing,
    Decreasing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Level(u64);

impl TryFrom<i64> for Level {
    type Error = ReportError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Err(ReportError::InputCannotBeZero),
            v if v < 0 => Err(ReportError::InputCannotBeNegative(v)),
            v => Ok(Self(v.unsigned_abs())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Report {
    levels: Vec<Level>,
}

impl Report {
    pub fn new(levels: Vec<Level>) -> Self {
        Self { levels }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Checks the levels pair by pair and reports the first violation.
    pub fn check(&self) -> Result<(), UnsafeReason> {
        if self.levels.is_empty() {
            return Err(UnsafeReason::ReportIsEmpty);
        }

        let mut direction = None;
        for pair in self.levels.windows(2) {
            let (previous, current) = (pair[0].0, pair[1].0);
            if previous == current {
                return Err(UnsafeReason::NeitherIncreasingNorDecreasing);
            }

            let slope = if current > previous {
                Slope::Increasing
            } else {
                Slope::Decreasing
            };
            if *direction.get_or_insert(slope) != slope {
                return Err(UnsafeReason::IncreasingAndDecreasing);
            }

            if previous.abs_diff(current) > MAX_STEP {
                return Err(match slope {
                    Slope::Increasing => UnsafeReason::IncreasedByMoreThanThree,
                    Slope::Decreasing => UnsafeReason::DecreasedByMoreThanThree,
                });
            }
        }

        Ok(())
    }

    pub fn is_safe(&self) -> bool {
        self.check().is_ok()
    }

    /// Safe as is, or safe once any single level is removed.
    pub fn is_safe_with_problem_dampener(&self) -> bool {
        if self.is_safe() {
            return true;
        }

        (0..self.levels.len()).any(|skip| {
            let mut levels = self.levels.clone();
            levels.remove(skip);
            Report::new(levels).is_safe()
        })
    }
}

fn parse_line(input: &str) -> IResult<&str, Vec<i64>> {
    all_consuming(separated_list1(space1, signed))(input)
}

pub fn parse_reports(input: &str) -> Result<Vec<Report>, ReportError> {
    let reports = input
        .lines()
        .enumerate()
        .map(|(idx, line)| {
            let (_, values) = parse_line(line.trim())
                .map_err(|_| ReportError::InvalidFormat { line: idx + 1 })?;
            values
                .into_iter()
                .map(Level::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Report::new)
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = reports.len(), "parsed reports");
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn report(levels: &[u64]) -> Report {
        Report::new(levels.iter().copied().map(Level).collect())
    }

    #[rstest]
    #[case(&[7, 6, 4, 2, 1], Ok(()))]
    #[case(&[1, 2, 7, 8, 9], Err(UnsafeReason::IncreasedByMoreThanThree))]
    #[case(&[9, 7, 6, 2, 1], Err(UnsafeReason::DecreasedByMoreThanThree))]
    #[case(&[1, 3, 2, 4, 5], Err(UnsafeReason::IncreasingAndDecreasing))]
    #[case(&[8, 6, 4, 4, 1], Err(UnsafeReason::NeitherIncreasingNorDecreasing))]
    #[case(&[1, 3, 6, 7, 9], Ok(()))]
    #[case(&[5], Ok(()))]
    #[case(&[], Err(UnsafeReason::ReportIsEmpty))]
    fn test_check(#[case] levels: &[u64], #[case] expected: Result<(), UnsafeReason>) {
        assert_eq!(expected, report(levels).check());
    }

    #[rstest]
    #[case(&[7, 6, 4, 2, 1], true)]
    #[case(&[1, 2, 7, 8, 9], false)]
    #[case(&[9, 7, 6, 2, 1], false)]
    #[case(&[1, 3, 2, 4, 5], true)]
    #[case(&[8, 6, 4, 4, 1], true)]
    #[case(&[1, 3, 6, 7, 9], true)]
    // removing the first level fixes the direction
    #[case(&[5, 1, 2, 3, 4], true)]
    fn test_problem_dampener(#[case] levels: &[u64], #[case] expected: bool) {
        assert_eq!(expected, report(levels).is_safe_with_problem_dampener());
    }

    #[rstest]
    #[case("1 2 0", ReportError::InputCannotBeZero)]
    #[case("1 -2", ReportError::InputCannotBeNegative(-2))]
    #[case("1 2\n1,2", ReportError::InvalidFormat { line: 2 })]
    fn test_parse_errors(#[case] input: &str, #[case] expected: ReportError) {
        assert_eq!(Err(expected), parse_reports(input));
    }
}
