use crate::instructions::{scan, sum_products};

#[tracing::instrument(skip(input))]
pub fn process(input: &str) -> miette::Result<String> {
    let instructions = scan(input);

    Ok(sum_products(&instructions, true)?.to_string())
}
