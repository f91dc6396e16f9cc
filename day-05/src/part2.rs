use tracing::warn;

use crate::print_queue::parse;

/// Puts the out-of-order updates right and sums their middle pages.
#[tracing::instrument(skip(input))]
pub fn process(input: &str) -> miette::Result<String> {
    let (ruleset, updates) = parse(input)?;

    let mut total = 0u32;
    for update in updates.iter().filter(|update| !ruleset.is_valid(update)) {
        match ruleset.correct(update) {
            Ok(corrected) if ruleset.is_valid(&corrected) => {
                total += corrected.middle_page().map_or(0, |page| page.get());
            }
            Ok(corrected) => warn!(pages = ?corrected.pages(), "update still out of order"),
            Err(e) => warn!(error = %e, "skipping update"),
        }
    }

    Ok(total.to_string())
}
