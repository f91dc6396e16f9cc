use crate::calibration::{parse_equations, total_calibration, Operator};

const OPERATORS: &[Operator] = &[Operator::Add, Operator::Multiply, Operator::Concatenate];

/// Calibration total once concatenation joins the operators.
#[tracing::instrument(skip(input))]
pub fn process(input: &str) -> miette::Result<String> {
    let equations = parse_equations(input)?;

    Ok(total_calibration(&equations, OPERATORS).to_string())
}
