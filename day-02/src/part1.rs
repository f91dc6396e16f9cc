use crate::reports::parse_reports;

#[tracing::instrument(skip(input))]
pub fn process(input: &str) -> miette::Result<String> {
    let reports = parse_reports(input)?;

    let safe = reports.iter().filter(|report| report.is_safe()).count();
    Ok(safe.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn test_process() -> miette::Result<()> {
        let input = "7 6 4 2 1
1 2 7 8 9
9 7 6 2 1
1 3 2 4 5
8 6 4 4 1
1 3 6 7 9";
        assert_eq!("2", process(input)?);
        Ok(())
    }
}
