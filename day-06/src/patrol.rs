use std::collections::HashMap;
use std::fmt;

use miette::{Diagnostic, SourceSpan};
use nom::{
    character::complete::{line_ending, multispace0, one_of},
    combinator::all_consuming,
    multi::{many1, separated_list1},
    sequence::terminated,
    IResult, Parser,
};
use nom_locate::LocatedSpan;
use thiserror::Error;
use tracing::{debug, warn};

const FREE: char = '.';
const OBSTACLE: char = '#';
const MAP_CHARS: &str = ".#^>v<";

// region: errors
#[derive(Debug, Error, Diagnostic)]
pub enum PatrolError {
    #[error("Patrol map is empty")]
    #[diagnostic(code(day6::empty_map))]
    EmptyMap,

    #[error("Invalid patrol map input")]
    #[diagnostic(
        code(day6::invalid_space),
        help("Map may only contain '.', '#' and a single guard: '^', '>', 'v' or '<'")
    )]
    InvalidSpace {
        #[source_code]
        src: String,
        #[label("unexpected character")]
        span: SourceSpan,
    },

    #[error("No guard found on the patrol map")]
    #[diagnostic(code(day6::missing_guard))]
    MissingGuard,

    #[error("Found a second guard at {second}, the first one is at {first}")]
    #[diagnostic(code(day6::multiple_guards))]
    MultipleGuards { first: Location, second: Location },

    #[error("Guard is boxed in at {location}")]
    #[diagnostic(code(day6::stuck))]
    Stuck { location: Location },

    #[error("Patrol exceeded {limit} steps without leaving the map or looping")]
    #[diagnostic(code(day6::step_limit))]
    StepLimitExceeded { limit: usize },

    #[error("Unobstructed patrol never leaves the map")]
    #[diagnostic(code(day6::baseline_loops))]
    BaselineLoops,
}
// endregion

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Up, // ^
    Right, // >
    Down,  // v
    Left,  // <
}

impl Direction {
    pub fn turn_right(self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
        }
    }

    fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }

    fn from_marker(c: char) -> Option<Self> {
        match c {
            '^' => Some(Self::Up),
            '>' => Some(Self::Right),
            'v' => Some(Self::Down),
            '<' => Some(Self::Left),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self {
            Self::Up => '^',
            Self::Right => '>',
            Self::Down => 'v',
            Self::Left => '<',
        };
        write!(f, "{marker}")
    }
}

/// A point on (or off) the patrol map. Off-map points may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn ahead(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// What occupies a cell of the lab. Every obstacle blocks the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Space {
    #[default]
    Free,
    FailedSuitPrototypes,
    SpoolOfVeryLongPolymers,
    Crates,
    TankOfUniversalSolvent,
}

impl Space {
    pub fn is_free(self) -> bool {
        matches!(self, Self::Free)
    }
}

/// Set of directions a guard has faced while standing on one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Headings(u8);

impl Headings {
    /// Returns `false` if the direction was already present.
    fn insert(&mut self, direction: Direction) -> bool {
        let fresh = !self.contains(direction);
        self.0 |= direction.bit();
        fresh
    }

    pub fn contains(&self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Every (location, direction) pair a guard has occupied during one patrol.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VisitRecord(HashMap<Location, Headings>);

impl VisitRecord {
    /// Returns `false` when the pair was recorded before.
    fn record(&mut self, location: Location, direction: Direction) -> bool {
        self.0.entry(location).or_default().insert(direction)
    }

    pub fn contains(&self, location: Location, direction: Direction) -> bool {
        self.0
            .get(&location)
            .is_some_and(|headings| headings.contains(direction))
    }

    pub fn headings(&self, location: Location) -> Option<Headings> {
        self.0.get(&location).copied()
    }

    pub fn distinct_locations(&self) -> usize {
        self.0.len()
    }

    pub fn pair_count(&self) -> usize {
        self.0.values().map(Headings::len).sum()
    }

    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        self.0.keys().copied()
    }
}

/// Outcome of a single step attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Moved,
    Exited,
    Repeated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guard {
    location: Location,
    direction: Direction,
    visited: VisitRecord,
}

impl Guard {
    pub fn new(location: Location, direction: Direction) -> Self {
        let mut visited = VisitRecord::default();
        visited.record(location, direction);
        Self {
            location,
            direction,
            visited,
        }
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn visited(&self) -> &VisitRecord {
        &self.visited
    }

    pub fn turn_right(&mut self) {
        self.direction = self.direction.turn_right();
    }

    /// Moves one cell forward, turning right in place while the way ahead is
    /// blocked. `obstruction` blocks like an obstacle without touching the map.
    pub fn step(
        &mut self,
        map: &PatrolMap,
        obstruction: Option<Location>,
    ) -> Result<Step, PatrolError> {
        for _ in 0..4 {
            let ahead = self.location.ahead(self.direction);
            if map.blocks(ahead, obstruction) {
                self.turn_right();
                continue;
            }

            self.location = ahead;
            if !map.on_map(ahead) {
                return Ok(Step::Exited);
            }

            return Ok(if self.visited.record(ahead, self.direction) {
                Step::Moved
            } else {
                Step::Repeated
            });
        }

        Err(PatrolError::Stuck {
            location: self.location,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatrolOutcome {
    Exited {
        visited: VisitRecord,
        steps: usize,
    },
    Looped {
        location: Location,
        direction: Direction,
        steps: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PatrolMap {
    spaces: HashMap<Location, Space>,
}

impl PatrolMap {
    pub fn on_map(&self, location: Location) -> bool {
        self.spaces.contains_key(&location)
    }

    /// Off-map locations are never free.
    pub fn is_free(&self, location: Location) -> bool {
        self.spaces.get(&location).is_some_and(|space| space.is_free())
    }

    /// Off-map locations never block, that is how a guard leaves.
    fn blocks(&self, location: Location, obstruction: Option<Location>) -> bool {
        self.on_map(location) && (!self.is_free(location) || obstruction == Some(location))
    }

    /// No patrol can make more moves than there are (cell, direction) pairs.
    fn step_limit(&self) -> usize {
        self.spaces.len() * 4 + 1
    }

    pub fn patrol(
        &self,
        mut guard: Guard,
        obstruction: Option<Location>,
    ) -> Result<PatrolOutcome, PatrolError> {
        let limit = self.step_limit();

        for steps in 1..=limit {
            match guard.step(self, obstruction)? {
                Step::Moved => {}
                Step::Exited => {
                    return Ok(PatrolOutcome::Exited {
                        visited: guard.visited,
                        steps,
                    })
                }
                Step::Repeated => {
                    return Ok(PatrolOutcome::Looped {
                        location: guard.location,
                        direction: guard.direction,
                        steps,
                    })
                }
            }
        }

        Err(PatrolError::StepLimitExceeded { limit })
    }

    /// Runs the patrol from the guard's position with no extra obstruction.
    pub fn baseline(&self, guard: &Guard) -> Result<VisitRecord, PatrolError> {
        match self.patrol(Guard::new(guard.location(), guard.direction()), None)? {
            PatrolOutcome::Exited { visited, steps } => {
                debug!(steps, "guard left the map");
                Ok(visited)
            }
            PatrolOutcome::Looped { .. } => Err(PatrolError::BaselineLoops),
        }
    }

    /// Every cell on the baseline route, apart from the start, where a single
    /// extra obstruction traps the guard in a loop. Sorted.
    pub fn loop_obstructions(&self, guard: &Guard) -> Result<Vec<Location>, PatrolError> {
        let start = guard.location();
        let direction = guard.direction();
        let visited = self.baseline(guard)?;

        let mut obstructions = Vec::new();
        for candidate in visited.locations().filter(|location| *location != start) {
            match self.patrol(Guard::new(start, direction), Some(candidate)) {
                Ok(PatrolOutcome::Looped { steps, .. }) => {
                    debug!(%candidate, steps, "obstruction causes a loop");
                    obstructions.push(candidate);
                }
                Ok(PatrolOutcome::Exited { .. }) => {}
                Err(PatrolError::Stuck { location }) => {
                    warn!(%candidate, %location, "obstruction boxes the guard in");
                }
                Err(e) => return Err(e),
            }
        }

        obstructions.sort_unstable();
        Ok(obstructions)
    }
}

// region: nom parser
type Span<'a> = LocatedSpan<&'a str>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LocatedMarker<'a> {
    marker: char,
    position: Span<'a>,
}

fn parse_marker(input: Span) -> IResult<Span, LocatedMarker> {
    one_of(MAP_CHARS)
        .map(|marker| LocatedMarker {
            marker,
            position: input,
        })
        .parse(input)
}

fn parse_rows(input: Span) -> IResult<Span, Vec<Vec<LocatedMarker>>> {
    all_consuming(terminated(
        separated_list1(line_ending, many1(parse_marker)),
        multispace0,
    ))(input)
}

/// Builds the map and the guard from puzzle text.
pub fn parse(input: &str) -> Result<(PatrolMap, Guard), PatrolError> {
    if input.trim().is_empty() {
        return Err(PatrolError::EmptyMap);
    }

    let (_, rows) = parse_rows(Span::new(input)).map_err(|e| {
        let offset = match e {
            nom::Err::Error(e) | nom::Err::Failure(e) => e.input.location_offset(),
            nom::Err::Incomplete(_) => input.len(),
        };
        PatrolError::InvalidSpace {
            src: input.to_string(),
            span: (offset, usize::from(offset < input.len())).into(),
        }
    })?;

    let mut spaces = HashMap::new();
    let mut guard: Option<Guard> = None;

    for marker in rows.iter().flatten() {
        let location = Location::new(
            marker.position.get_column() as i32 - 1,
            marker.position.location_line() as i32 - 1,
        );

        let space = match marker.marker {
            FREE => Space::Free,
            OBSTACLE => Space::Crates,
            c => {
                if let Some(first) = &guard {
                    return Err(PatrolError::MultipleGuards {
                        first: first.location(),
                        second: location,
                    });
                }
                if let Some(direction) = Direction::from_marker(c) {
                    guard = Some(Guard::new(location, direction));
                }
                Space::Free
            }
        };
        spaces.insert(location, space);
    }

    let guard = guard.ok_or(PatrolError::MissingGuard)?;
    debug!(cells = spaces.len(), guard = %guard.location(), "parsed patrol map");

    Ok((PatrolMap { spaces }, guard))
}
// endregion
