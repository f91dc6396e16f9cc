use std::collections::HashMap;

use miette::{Diagnostic, SourceSpan};
use nom::{
    character::complete::{line_ending, multispace0, satisfy},
    combinator::all_consuming,
    multi::{many1, separated_list1},
    sequence::terminated,
    IResult, Parser,
};
use nom_locate::LocatedSpan;
use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::Dfs,
    Direction,
};
use thiserror::Error;
use tracing::debug;

mod constants {
    pub const TRAILHEAD: u8 = 0;
    pub const PEAK: u8 = 9;
    pub const IMPASSABLE: char = '.';
}

use constants::*;

#[derive(Debug, Error, Diagnostic)]
pub enum TopographyError {
    #[error("Empty map")]
    #[diagnostic(code(day10::empty_map), help("Provide at least one row of heights"))]
    Empty,

    #[error("Invalid height")]
    #[diagnostic(
        code(day10::invalid_height),
        help("Heights must be digits 0-9, or '.' for impassable ground")
    )]
    InvalidHeight {
        #[source_code]
        src: String,
        #[label("here")]
        span: SourceSpan,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

/// A passable cell of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    pub position: Position,
    pub height: u8,
}

/// Heights as a directed graph: each edge climbs exactly one step between
/// orthogonal neighbours.
#[derive(Debug, Clone)]
pub struct TopographicMap {
    graph: DiGraph<Node, ()>,
}

impl TopographicMap {
    pub fn parse(input: &str) -> Result<Self, TopographyError> {
        if input.trim().is_empty() {
            return Err(TopographyError::Empty);
        }

        let (_, rows) = parser::parse_grid(LocatedSpan::new(input)).map_err(|e| {
            let offset = match e {
                nom::Err::Error(e) | nom::Err::Failure(e) => e.input.location_offset(),
                nom::Err::Incomplete(_) => input.len(),
            };
            TopographyError::InvalidHeight {
                src: input.to_string(),
                span: (offset, usize::from(offset < input.len())).into(),
            }
        })?;

        let mut graph = DiGraph::<Node, ()>::new();
        let indices: HashMap<Position, NodeIndex> = rows
            .into_iter()
            .flatten()
            .flatten()
            .map(|node| (node.position, graph.add_node(node)))
            .collect();

        for (position, &current) in &indices {
            let height = graph[current].height;
            let neighbours = [
                position.y.checked_sub(1).map(|y| Position { x: position.x, y }),
                Some(Position { x: position.x + 1, y: position.y }),
                Some(Position { x: position.x, y: position.y + 1 }),
                position.x.checked_sub(1).map(|x| Position { x, y: position.y }),
            ];

            for neighbour in neighbours.into_iter().flatten() {
                if let Some(&next) = indices.get(&neighbour) {
                    if graph[next].height == height + 1 {
                        graph.add_edge(current, next, ());
                    }
                }
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built topographic graph"
        );
        Ok(Self { graph })
    }

    pub fn graph(&self) -> &DiGraph<Node, ()> {
        &self.graph
    }

    pub fn trailheads(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .node_indices()
            .filter(|idx| self.graph[*idx].height == TRAILHEAD)
    }

    /// Number of distinct peaks reachable from `trailhead`.
    pub fn score(&self, trailhead: NodeIndex) -> usize {
        let mut dfs = Dfs::new(&self.graph, trailhead);
        let mut peaks = 0;
        while let Some(node) = dfs.next(&self.graph) {
            if self.graph[node].height == PEAK {
                peaks += 1;
            }
        }
        peaks
    }

    /// Number of distinct hiking trails from `trailhead` to any peak.
    pub fn rating(&self, trailhead: NodeIndex) -> usize {
        let mut memo = HashMap::new();
        self.trails_from(trailhead, &mut memo)
    }

    fn trails_from(&self, node: NodeIndex, memo: &mut HashMap<NodeIndex, usize>) -> usize {
        if self.graph[node].height == PEAK {
            return 1;
        }
        if let Some(&count) = memo.get(&node) {
            return count;
        }

        let count = self
            .graph
            .neighbors_directed(node, Direction::Outgoing)
            .map(|next| self.trails_from(next, memo))
            .sum();
        memo.insert(node, count);
        count
    }

    pub fn total_score(&self) -> usize {
        self.trailheads().map(|trailhead| self.score(trailhead)).sum()
    }

    pub fn total_rating(&self) -> usize {
        self.trailheads().map(|trailhead| self.rating(trailhead)).sum()
    }
}

// region: parser module
mod parser {
    use super::*;

    type Span<'a> = LocatedSpan<&'a str>;

    fn parse_node(input: Span) -> IResult<Span, Option<Node>> {
        let position = Position {
            x: input.get_column() - 1,
            y: input.location_line() as usize - 1,
        };
        satisfy(|c: char| c.is_ascii_digit() || c == IMPASSABLE)
            .map(|c| {
                c.to_digit(10).map(|height| Node {
                    position,
                    height: height as u8,
                })
            })
            .parse(input)
    }

    pub(crate) fn parse_grid(input: Span) -> IResult<Span, Vec<Vec<Option<Node>>>> {
        all_consuming(terminated(
            separated_list1(line_ending, many1(parse_node)),
            multispace0,
        ))(input)
    }
}
// endregion
