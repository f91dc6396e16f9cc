use std::collections::{HashMap, HashSet};

use miette::{Diagnostic, SourceSpan};
use nom::{
    character::complete::{char, line_ending, multispace0, multispace1, u32 as unsigned},
    combinator::all_consuming,
    multi::separated_list1,
    sequence::{separated_pair, terminated, tuple},
    IResult,
};
use petgraph::{algo::toposort, graphmap::DiGraphMap};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Diagnostic)]
pub enum PrintQueueError {
    #[error("Input cannot be zero")]
    #[diagnostic(code(day5::zero))]
    InputCannotBeZero,

    #[error("Invalid input format")]
    #[diagnostic(
        code(day5::invalid_format),
        help("Expected 'X|Y' rules, a blank line, then comma separated updates")
    )]
    InvalidFormat {
        #[source_code]
        src: String,
        #[label("parsing stopped here")]
        span: SourceSpan,
    },

    #[error("Rules form a cycle around page {0}, update cannot be ordered")]
    #[diagnostic(code(day5::cycle))]
    Cycle(PageNumber),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageNumber(u32);

impl PageNumber {
    pub fn new(number: u32) -> Result<Self, PrintQueueError> {
        if number == 0 {
            return Err(PrintQueueError::InputCannotBeZero);
        }
        Ok(Self(number))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PageNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `left` must be printed at some point before `right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageOrderingRule {
    pub left: PageNumber,
    pub right: PageNumber,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Update {
    pages: Vec<PageNumber>,
}

impl Update {
    pub fn new(pages: Vec<PageNumber>) -> Self {
        Self { pages }
    }

    pub fn pages(&self) -> &[PageNumber] {
        &self.pages
    }

    pub fn middle_page(&self) -> Option<PageNumber> {
        self.pages.get(self.pages.len() / 2).copied()
    }

    pub fn position(&self, page: PageNumber) -> Option<usize> {
        self.pages.iter().position(|p| *p == page)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageOrderingRuleset {
    rules: HashSet<PageOrderingRule>,
}

impl PageOrderingRuleset {
    pub fn add_rule(&mut self, rule: PageOrderingRule) {
        self.rules.insert(rule);
    }

    /// A rule only applies when both of its pages are in the update.
    pub fn rule_holds(&self, rule: &PageOrderingRule, update: &Update) -> bool {
        match (update.position(rule.left), update.position(rule.right)) {
            (Some(left), Some(right)) => left < right,
            _ => true,
        }
    }

    pub fn is_valid(&self, update: &Update) -> bool {
        self.rules.iter().all(|rule| self.rule_holds(rule, update))
    }

    /// Reorders the update so every applicable rule holds. Repeated pages are
    /// kept, the corrected update always has the original length.
    pub fn correct(&self, update: &Update) -> Result<Update, PrintQueueError> {
        let mut graph = DiGraphMap::<PageNumber, ()>::new();
        for page in update.pages() {
            graph.add_node(*page);
        }
        for rule in &self.rules {
            if graph.contains_node(rule.left) && graph.contains_node(rule.right) {
                graph.add_edge(rule.left, rule.right, ());
            }
        }

        let order = toposort(&graph, None).map_err(|cycle| PrintQueueError::Cycle(cycle.node_id()))?;
        let rank: HashMap<PageNumber, usize> = order
            .into_iter()
            .enumerate()
            .map(|(rank, page)| (page, rank))
            .collect();

        let mut pages = update.pages().to_vec();
        pages.sort_by_key(|page| rank.get(page).copied().unwrap_or(usize::MAX));
        debug!(before = ?update.pages(), after = ?pages, "corrected update");
        Ok(Update::new(pages))
    }
}

// region: nom parser
fn page(input: &str) -> IResult<&str, u32> {
    unsigned(input)
}

fn rule(input: &str) -> IResult<&str, (u32, u32)> {
    separated_pair(page, char('|'), page)(input)
}

fn update(input: &str) -> IResult<&str, Vec<u32>> {
    separated_list1(char(','), page)(input)
}

type RawQueue = (Vec<(u32, u32)>, Vec<Vec<u32>>);

fn queue(input: &str) -> IResult<&str, RawQueue> {
    let (input, (rules, _, updates)) = all_consuming(terminated(
        tuple((
            separated_list1(line_ending, rule),
            multispace1,
            separated_list1(line_ending, update),
        )),
        multispace0,
    ))(input)?;
    Ok((input, (rules, updates)))
}
// endregion

pub fn parse(input: &str) -> Result<(PageOrderingRuleset, Vec<Update>), PrintQueueError> {
    let (_, (raw_rules, raw_updates)) = queue(input).map_err(|e| {
        let offset = match e {
            nom::Err::Error(e) | nom::Err::Failure(e) => input.len() - e.input.len(),
            nom::Err::Incomplete(_) => input.len(),
        };
        PrintQueueError::InvalidFormat {
            src: input.to_string(),
            span: (offset, usize::from(offset < input.len())).into(),
        }
    })?;

    let mut ruleset = PageOrderingRuleset::default();
    for (left, right) in raw_rules {
        ruleset.add_rule(PageOrderingRule {
            left: PageNumber::new(left)?,
            right: PageNumber::new(right)?,
        });
    }

    let updates = raw_updates
        .into_iter()
        .map(|pages| {
            pages
                .into_iter()
                .map(PageNumber::new)
                .collect::<Result<Vec<_>, _>>()
                .map(Update::new)
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(rules = ruleset.rules.len(), updates = updates.len(), "parsed print queue");
    Ok((ruleset, updates))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SAMPLE: &str = "47|53
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
97,13,75,29,47
";

    fn pages(numbers: &[u32]) -> Update {
        Update::new(numbers.iter().map(|n| PageNumber(*n)).collect())
    }

    #[test]
    fn test_parse() -> miette::Result<()> {
        let (ruleset, updates) = parse(SAMPLE)?;
        assert_eq!(21, ruleset.rules.len());
        assert_eq!(6, updates.len());
        assert_eq!(pages(&[75, 29, 13]), updates[2]);
        Ok(())
    }

    #[rstest]
    #[case(0, true)]
    #[case(1, true)]
    #[case(2, true)]
    #[case(3, false)]
    #[case(4, false)]
    #[case(5, false)]
    fn test_is_valid(#[case] index: usize, #[case] expected: bool) -> miette::Result<()> {
        let (ruleset, updates) = parse(SAMPLE)?;
        assert_eq!(expected, ruleset.is_valid(&updates[index]));
        Ok(())
    }

    #[rstest]
    #[case(&[75, 97, 47, 61, 53], &[97, 75, 47, 61, 53])]
    #[case(&[61, 13, 29], &[61, 29, 13])]
    #[case(&[97, 13, 75, 29, 47], &[97, 75, 47, 29, 13])]
    fn test_correct(#[case] before: &[u32], #[case] after: &[u32]) -> miette::Result<()> {
        let (ruleset, _) = parse(SAMPLE)?;
        let corrected = ruleset.correct(&pages(before))?;
        assert_eq!(pages(after), corrected);
        assert!(ruleset.is_valid(&corrected));
        Ok(())
    }

    #[rstest]
    #[case(&[5, 2, 1, 5, 6])]
    #[case(&[2, 2, 1])]
    #[case(&[7, 7, 7])]
    fn test_correct_keeps_repeated_pages(#[case] before: &[u32]) -> miette::Result<()> {
        let mut ruleset = PageOrderingRuleset::default();
        ruleset.add_rule(PageOrderingRule {
            left: PageNumber(1),
            right: PageNumber(2),
        });

        let corrected = ruleset.correct(&pages(before))?;
        assert_eq!(before.len(), corrected.pages().len());

        let mut expected = before.to_vec();
        expected.sort_unstable();
        let mut found = corrected.pages().iter().map(|p| p.get()).collect::<Vec<_>>();
        found.sort_unstable();
        assert_eq!(expected, found);
        assert!(ruleset.is_valid(&corrected));
        Ok(())
    }

    #[test]
    fn test_rule_ignored_when_page_missing() {
        let mut ruleset = PageOrderingRuleset::default();
        ruleset.add_rule(PageOrderingRule {
            left: PageNumber(1),
            right: PageNumber(2),
        });
        assert!(ruleset.is_valid(&pages(&[3, 2])));
        assert!(!ruleset.is_valid(&pages(&[2, 3, 1])));
    }

    #[test]
    fn test_correct_detects_cycle() {
        let mut ruleset = PageOrderingRuleset::default();
        for (left, right) in [(1, 2), (2, 3), (3, 1)] {
            ruleset.add_rule(PageOrderingRule {
                left: PageNumber(left),
                right: PageNumber(right),
            });
        }
        assert!(matches!(
            ruleset.correct(&pages(&[1, 2, 3])),
            Err(PrintQueueError::Cycle(_))
        ));
    }

    #[test]
    fn test_middle_page() {
        assert_eq!(Some(PageNumber(61)), pages(&[75, 47, 61, 53, 29]).middle_page());
        assert_eq!(None, pages(&[]).middle_page());
    }

    #[rstest]
    #[case("1|2\n\n3,0")]
    #[case("0|2\n\n3,4")]
    fn test_zero_page(#[case] input: &str) {
        assert!(matches!(parse(input), Err(PrintQueueError::InputCannotBeZero)));
    }

    #[test]
    fn test_invalid_format() {
        let err = parse("1|2\n\n3;4").unwrap_err();
        match err {
            PrintQueueError::InvalidFormat { span, .. } => assert_eq!(6, span.offset()),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
