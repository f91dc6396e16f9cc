use itertools::Itertools;
use miette::{Diagnostic, SourceSpan};
use nom::{
    bytes::complete::tag,
    character::complete::{space0, space1, u64 as unsigned},
    combinator::all_consuming,
    multi::separated_list1,
    sequence::{terminated, tuple},
    IResult,
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Diagnostic, Error)]
#[error("Failed to parse line {line}")]
#[diagnostic(
    code(day7::parse_line),
    help("Each line should look like '190: 10 19'")
)]
pub struct ParseLineError {
    pub line: usize,
    #[source_code]
    src: String,
    #[label("here")]
    span: SourceSpan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Multiply,
    Concatenate,
}

impl Operator {
    /// `None` when the result does not fit in a `u64`.
    pub fn evaluate(self, left: u64, right: u64) -> Option<u64> {
        match self {
            Self::Add => left.checked_add(right),
            Self::Multiply => left.checked_mul(right),
            Self::Concatenate => {
                let digits = right.checked_ilog10().unwrap_or(0) + 1;
                left.checked_mul(10u64.checked_pow(digits)?)?
                    .checked_add(right)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    test_value: u64,
    numbers: Vec<u64>,
}

impl Equation {
    pub fn new(test_value: u64, numbers: Vec<u64>) -> Self {
        Self {
            test_value,
            numbers,
        }
    }

    pub fn test_value(&self) -> u64 {
        self.test_value
    }

    /// Operators are applied left to right, every combination is tried.
    pub fn is_solvable(&self, operators: &[Operator]) -> bool {
        let Some((first, rest)) = self.numbers.split_first() else {
            return false;
        };

        // with no zeros around no operator can shrink a partial result
        let prune = !rest.contains(&0);
        let mut partials = vec![*first];

        for &number in rest {
            partials = partials
                .iter()
                .flat_map(|&partial| {
                    operators
                        .iter()
                        .filter_map(move |op| op.evaluate(partial, number))
                })
                .filter(|value| !prune || *value <= self.test_value)
                .unique()
                .collect();

            if partials.is_empty() {
                return false;
            }
        }

        partials.contains(&self.test_value)
    }
}

// region: parser
fn parse_line(input: &str) -> IResult<&str, Equation> {
    let (input, (test_value, _, _, numbers)) = all_consuming(terminated(
        tuple((
            unsigned,
            tag(":"),
            space1,
            separated_list1(space1, unsigned),
        )),
        space0,
    ))(input)?;

    Ok((input, Equation::new(test_value, numbers)))
}
// endregion

pub fn parse_equations(input: &str) -> Result<Vec<Equation>, ParseLineError> {
    let equations = input
        .lines()
        .enumerate()
        .map(|(idx, line)| {
            let line = line.trim_end();
            parse_line(line)
                .map(|(_, equation)| equation)
                .map_err(|_| ParseLineError {
                    line: idx + 1,
                    src: line.to_string(),
                    span: (0, line.len()).into(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = equations.len(), "parsed equations");
    Ok(equations)
}

/// Sums the test values of every equation the operators can satisfy.
pub fn total_calibration(equations: &[Equation], operators: &[Operator]) -> u64 {
    equations
        .iter()
        .filter(|equation| equation.is_solvable(operators))
        .map(Equation::test_value)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const ADD_MUL: &[Operator] = &[Operator::Add, Operator::Multiply];
    const ALL: &[Operator] = &[Operator::Add, Operator::Multiply, Operator::Concatenate];

    #[rstest]
    #[case(Operator::Add, 6, 8, Some(14))]
    #[case(Operator::Multiply, 6, 8, Some(48))]
    #[case(Operator::Concatenate, 12, 345, Some(12345))]
    #[case(Operator::Concatenate, 15, 6, Some(156))]
    #[case(Operator::Concatenate, 7, 0, Some(70))]
    #[case(Operator::Concatenate, 1, 10, Some(110))]
    #[case(Operator::Multiply, u64::MAX, 2, None)]
    fn test_evaluate(
        #[case] op: Operator,
        #[case] left: u64,
        #[case] right: u64,
        #[case] expected: Option<u64>,
    ) {
        assert_eq!(expected, op.evaluate(left, right));
    }

    #[rstest]
    #[case("190: 10 19", true, true)]
    #[case("3267: 81 40 27", true, true)]
    #[case("83: 17 5", false, false)]
    #[case("156: 15 6", false, true)]
    #[case("7290: 6 8 6 15", false, true)]
    #[case("192: 17 8 14", false, true)]
    #[case("21037: 9 7 18 13", false, false)]
    #[case("292: 11 6 16 20", true, true)]
    #[case("0: 5 0", true, true)]
    fn test_is_solvable(
        #[case] line: &str,
        #[case] with_add_mul: bool,
        #[case] with_all: bool,
    ) -> miette::Result<()> {
        let equation = parse_equations(line)?.remove(0);
        assert_eq!(with_add_mul, equation.is_solvable(ADD_MUL));
        assert_eq!(with_all, equation.is_solvable(ALL));
        Ok(())
    }

    #[test]
    fn test_parse_line() -> miette::Result<()> {
        assert_eq!(
            vec![Equation::new(3267, vec![81, 40, 27])],
            parse_equations("3267: 81 40 27")?
        );
        Ok(())
    }

    #[rstest]
    #[case("190 10 19", 1)]
    #[case("190: 10 19\n83:", 2)]
    #[case("190: 10, 19", 1)]
    fn test_parse_errors(#[case] input: &str, #[case] line: usize) {
        let err = parse_equations(input).unwrap_err();
        assert_eq!(line, err.line);
    }
}
