use miette::Diagnostic;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, u64 as unsigned},
    combinator::{map, value},
    sequence::{delimited, preceded, separated_pair},
    IResult,
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum InstructionError {
    #[error("Result overflowed while evaluating mul({0},{1})")]
    #[diagnostic(code(day3::overflow))]
    Overflow(u64, u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Do,
    Dont,
    Mul(u64, u64),
}

impl Instruction {
    /// Product for `mul`, zero for the conditionals.
    pub fn result(self) -> Result<u64, InstructionError> {
        match self {
            Self::Mul(left, right) => left
                .checked_mul(right)
                .ok_or(InstructionError::Overflow(left, right)),
            Self::Do | Self::Dont => Ok(0),
        }
    }
}

// region: nom parser
fn mul(input: &str) -> IResult<&str, Instruction> {
    map(
        preceded(
            tag("mul"),
            delimited(
                char('('),
                separated_pair(unsigned, char(','), unsigned),
                char(')'),
            ),
        ),
        |(left, right)| Instruction::Mul(left, right),
    )(input)
}

fn instruction(input: &str) -> IResult<&str, Instruction> {
    alt((
        value(Instruction::Do, tag("do()")),
        value(Instruction::Dont, tag("don't()")),
        mul,
    ))(input)
}
// endregion

/// Pulls every well-formed instruction out of corrupted memory, in order.
#[tracing::instrument(skip(input))]
pub fn scan(input: &str) -> Vec<Instruction> {
    let mut instructions = Vec::new();
    let mut remaining = input;

    while !remaining.is_empty() {
        if let Ok((rest, found)) = instruction(remaining) {
            instructions.push(found);
            remaining = rest;
            continue;
        }

        let mut chars = remaining.chars();
        chars.next();
        remaining = chars.as_str();
    }

    debug!(count = instructions.len(), "scanned instructions");
    instructions
}

/// Sums every `mul`, or only the enabled ones when `conditionals` is set.
pub fn sum_products(
    instructions: &[Instruction],
    conditionals: bool,
) -> Result<u64, InstructionError> {
    let mut enabled = true;
    let mut total = 0u64;

    for instruction in instructions {
        match instruction {
            Instruction::Do => enabled = true,
            Instruction::Dont => enabled = !conditionals,
            Instruction::Mul(left, right) if enabled => {
                total = total
                    .checked_add(instruction.result()?)
                    .ok_or(InstructionError::Overflow(*left, *right))?;
            }
            Instruction::Mul(..) => {}
        }
    }

    Ok(total)
}
