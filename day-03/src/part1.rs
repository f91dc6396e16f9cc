use crate::instructions::{scan, sum_products};

#[tracing::instrument(skip(input))]
pub fn process(input: &str) -> miette::Result<String> {
    let instructions = scan(input);

    Ok(sum_products(&instructions, false)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn test_process() -> miette::Result<()> {
        let input = "xmul(2,4)%&mul[3,7]!@^do_not_mul(5,5)+mul(32,64]then(mul(11,8)mul(8,5))";
        assert_eq!("161", process(input)?);
        Ok(())
    }
}
