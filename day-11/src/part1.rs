use crate::stones::{blink, parse};

const BLINKS: usize = 25;

/// Blinks the explicit row of stones and counts the result.
#[tracing::instrument(skip(input))]
pub fn process(input: &str) -> miette::Result<String> {
    let mut stones = parse(input)?;
    for _ in 0..BLINKS {
        stones = blink(&stones)?;
    }

    Ok(stones.len().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn test_process() -> miette::Result<()> {
        let input = "125 17";
        assert_eq!("55312", process(input)?);
        Ok(())
    }
}
