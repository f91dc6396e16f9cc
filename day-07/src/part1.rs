use crate::calibration::{parse_equations, total_calibration, Operator};

const OPERATORS: &[Operator] = &[Operator::Add, Operator::Multiply];

/// Calibration total using addition and multiplication.
#[tracing::instrument(skip(input))]
pub fn process(input: &str) -> miette::Result<String> {
    let equations = parse_equations(input)?;

    Ok(total_calibration(&equations, OPERATORS).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn test_process() -> miette::Result<()> {
        let input = "190: 10 19
3267: 81 40 27
83: 17 5
156: 15 6
7290: 6 8 6 15
161011: 16 10 13
192: 17 8 14
21037: 9 7 18 13
292: 11 6 16 20";
        assert_eq!("3749", process(input)?);
        Ok(())
    }
}
