use std::collections::{HashMap, HashSet};
use std::ops::{Add, Sub};

use itertools::Itertools;
use miette::{Diagnostic, SourceSpan};
use nom::{
    character::complete::{line_ending, multispace0, satisfy},
    combinator::all_consuming,
    multi::{many1, separated_list1},
    sequence::terminated,
    IResult, Parser,
};
use nom_locate::LocatedSpan;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Diagnostic)]
#[error("Failed to parse grid")]
#[diagnostic(
    code(day8::parse_error),
    help("Input must contain only dots (.) or alphanumeric frequency markers")
)]
pub struct GridParseError {
    #[source_code]
    src: String,
    #[label("Parse error occurred here")]
    span: SourceSpan,
}

#[derive(Debug, Error, Diagnostic)]
pub enum AntennaError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] GridParseError),

    #[error("Invalid grid: row {row} has {found} cells, expected {expected}")]
    #[diagnostic(code(day8::ragged_grid), help("Every row of the map must be the same length"))]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(&self, width: i32, height: i32) -> bool {
        (0..width).contains(&self.x) && (0..height).contains(&self.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Self) -> Self::Output {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Self) -> Self::Output {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Yields the antinodes that antenna `a` and antenna `b` produce beyond `b`.
pub trait AntinodeFinder {
    fn find_antinodes(&self, a: Point, b: Point, width: i32, height: i32) -> Vec<Point>;
}

/// One antinode, as far past `b` as `b` is from `a`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleAntinodeFinder;

impl AntinodeFinder for SimpleAntinodeFinder {
    fn find_antinodes(&self, a: Point, b: Point, width: i32, height: i32) -> Vec<Point> {
        let antinode = b + (b - a);
        if antinode.in_bounds(width, height) {
            vec![antinode]
        } else {
            vec![]
        }
    }
}

/// Every grid point on the line through both antennas, starting at `a`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HarmonicAntinodeFinder;

impl AntinodeFinder for HarmonicAntinodeFinder {
    fn find_antinodes(&self, a: Point, b: Point, width: i32, height: i32) -> Vec<Point> {
        let delta = b - a;
        let mut antinodes = vec![a];
        let mut current = b;

        while current.in_bounds(width, height) {
            antinodes.push(current);
            current = current + delta;
        }

        antinodes
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyMap {
    antennas: HashMap<char, Vec<Point>>,
    width: i32,
    height: i32,
}

impl FrequencyMap {
    pub fn parse(input: &str) -> Result<Self, AntennaError> {
        let (_, rows) = parse_grid(LocatedSpan::new(input)).map_err(|e| {
            let offset = match e {
                nom::Err::Error(e) | nom::Err::Failure(e) => e.input.location_offset(),
                nom::Err::Incomplete(_) => input.len(),
            };
            GridParseError {
                src: input.to_string(),
                span: (offset, usize::from(offset < input.len())).into(),
            }
        })?;

        let expected = rows.first().map(Vec::len).unwrap_or_default();
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != expected)
        {
            return Err(AntennaError::Ragged {
                row: row + 1,
                expected,
                found,
            });
        }

        let height = rows.len() as i32;
        let width = expected as i32;

        let mut antennas: HashMap<char, Vec<Point>> = HashMap::new();
        for cell in rows.iter().flatten().filter(|cell| cell.marker != EMPTY) {
            antennas
                .entry(cell.marker)
                .or_default()
                .push(cell.point);
        }

        debug!(width, height, frequencies = antennas.len(), "parsed antenna map");
        Ok(Self {
            antennas,
            width,
            height,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn antennas(&self, frequency: char) -> &[Point] {
        self.antennas
            .get(&frequency)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Distinct antinodes over every ordered pair of same-frequency antennas.
    pub fn antinodes(&self, finder: &impl AntinodeFinder) -> HashSet<Point> {
        self.antennas
            .values()
            .flat_map(|points| points.iter().permutations(2))
            .flat_map(|pair| finder.find_antinodes(*pair[0], *pair[1], self.width, self.height))
            .collect()
    }
}

// region: nom parser
const EMPTY: char = '.';

type Span<'a> = LocatedSpan<&'a str>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    marker: char,
    point: Point,
}

fn parse_cell(input: Span) -> IResult<Span, Cell> {
    let point = Point::new(
        input.get_column() as i32 - 1,
        input.location_line() as i32 - 1,
    );
    satisfy(|c: char| c.is_ascii_alphanumeric() || c == EMPTY)
        .map(|marker| Cell { marker, point })
        .parse(input)
}

fn parse_grid(input: Span) -> IResult<Span, Vec<Vec<Cell>>> {
    all_consuming(terminated(
        separated_list1(line_ending, many1(parse_cell)),
        multispace0,
    ))(input)
}
// endregion

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Point::new(8, 1), Point::new(5, 2), vec![Point::new(2, 3)])]
    #[case(Point::new(5, 2), Point::new(8, 1), vec![Point::new(11, 0)])]
    #[case(Point::new(1, 1), Point::new(0, 1), vec![])]
    fn test_simple_finder(#[case] a: Point, #[case] b: Point, #[case] expected: Vec<Point>) {
        assert_eq!(expected, SimpleAntinodeFinder.find_antinodes(a, b, 12, 12));
    }

    #[rstest]
    #[case(
        Point::new(0, 0),
        Point::new(1, 2),
        vec![Point::new(0, 0), Point::new(1, 2), Point::new(2, 4), Point::new(3, 6), Point::new(4, 8)]
    )]
    #[case(
        Point::new(1, 2),
        Point::new(3, 1),
        vec![Point::new(1, 2), Point::new(3, 1), Point::new(5, 0)]
    )]
    fn test_harmonic_finder(#[case] a: Point, #[case] b: Point, #[case] expected: Vec<Point>) {
        assert_eq!(expected, HarmonicAntinodeFinder.find_antinodes(a, b, 10, 10));
    }

    #[test]
    fn test_parse() -> miette::Result<()> {
        let map = FrequencyMap::parse("..a.\n.A..\n...a\n")?;
        assert_eq!(4, map.width());
        assert_eq!(3, map.height());
        assert_eq!(&[Point::new(2, 0), Point::new(3, 2)], map.antennas('a'));
        assert_eq!(&[Point::new(1, 1)], map.antennas('A'));
        assert!(map.antennas('0').is_empty());
        Ok(())
    }

    #[test]
    fn test_parse_invalid_marker() {
        let err = FrequencyMap::parse("..\n.#").unwrap_err();
        match err {
            AntennaError::Parse(err) => assert_eq!(SourceSpan::from((4, 1)), err.span),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[rstest]
    #[case("....\n..", 2, 4, 2)]
    #[case("a.\n...\n..", 2, 2, 3)]
    fn test_parse_rejects_ragged_rows(
        #[case] input: &str,
        #[case] row: usize,
        #[case] expected: usize,
        #[case] found: usize,
    ) {
        let err = FrequencyMap::parse(input).unwrap_err();
        assert!(matches!(
            err,
            AntennaError::Ragged { row: r, expected: e, found: f } if (r, e, f) == (row, expected, found)
        ));
    }

    #[test]
    fn test_antinodes_single_frequency() -> miette::Result<()> {
        let map = FrequencyMap::parse(
            "..........
..........
..........
....a.....
..........
.....a....
..........
..........
..........
..........",
        )?;
        let mut antinodes = map
            .antinodes(&SimpleAntinodeFinder)
            .into_iter()
            .collect::<Vec<_>>();
        antinodes.sort();
        assert_eq!(vec![Point::new(3, 1), Point::new(6, 7)], antinodes);
        Ok(())
    }
}
