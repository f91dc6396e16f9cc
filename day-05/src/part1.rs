use crate::print_queue::parse;

/// Sums the middle page of every update that is already in order.
#[tracing::instrument(skip(input))]
pub fn process(input: &str) -> miette::Result<String> {
    let (ruleset, updates) = parse(input)?;

    let total: u32 = updates
        .iter()
        .filter(|update| ruleset.is_valid(update))
        .filter_map(|update| update.middle_page())
        .map(|page| page.get())
        .sum();

    Ok(total.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn test_process() -> miette::Result<()> {
        let input = "47|53
97|13
97|61
97|47
75|29
61|13
75|53
29|13
97|29
53|29
61|53
97|53
61|29
47|13
75|47
97|75
47|61
75|61
47|29
75|13
53|13

75,47,61,53,29
97,61,53,29,13
75,29,13
75,97,47,61,53
61,13,29
97,13,75,29,47";
        assert_eq!("143", process(input)?);
        Ok(())
    }
}
