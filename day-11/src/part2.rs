use crate::stones::{count_after, parse};

const BLINKS: usize = 75;

#[tracing::instrument(skip(input))]
pub fn process(input: &str) -> miette::Result<String> {
    let stones = parse(input)?;

    Ok(count_after(&stones, BLINKS)?.to_string())
}
