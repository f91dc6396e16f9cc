use crate::reports::parse_reports;

#[tracing::instrument(skip(input))]
pub fn process(input: &str) -> miette::Result<String> {
    let reports = parse_reports(input)?;

    let safe = reports.iter().filter(|report| report.is_safe_with_problem_dampener()).count();
    Ok(safe.to_string())
}
