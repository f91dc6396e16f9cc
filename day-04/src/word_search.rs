use itertools::iproduct;
use miette::Diagnostic;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum WordSearchError {
    #[error("Invalid grid: input is empty")]
    #[diagnostic(code(day4::empty_grid))]
    Empty,

    #[error("Invalid grid: row {row} has {found} letters, expected {expected}")]
    #[diagnostic(code(day4::ragged_grid), help("Every row of the puzzle must be the same length"))]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// The eight ways a word can run through the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    North,
    NorthEast,
}

impl Direction {
    pub const COMPASS: [Direction; 8] = [
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
        Self::North,
        Self::NorthEast,
    ];

    /// (row, col) step
    fn delta(self) -> (isize, isize) {
        match self {
            Self::East => (0, 1),
            Self::SouthEast => (1, 1),
            Self::South => (1, 0),
            Self::SouthWest => (1, -1),
            Self::West => (0, -1),
            Self::NorthWest => (-1, -1),
            Self::North => (-1, 0),
            Self::NorthEast => (-1, 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub row: isize,
    pub col: isize,
}

impl Coordinate {
    pub const fn new(row: isize, col: isize) -> Self {
        Self { row, col }
    }

    fn offset(self, by: Coordinate) -> Self {
        Self::new(self.row + by.row, self.col + by.col)
    }
}

/// How a pattern lays the word out: in a line, or twice across the
/// diagonals of a square (main diagonal direction, anti diagonal direction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Flat(Direction),
    Cross(Direction, Direction),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    orientation: Orientation,
    offsets: Vec<Coordinate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Match {
    pub orientation: Orientation,
    pub location: Coordinate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    letters: Vec<char>,
    patterns: Vec<Pattern>,
}

impl Word {
    /// The word in a straight line, in every compass direction.
    pub fn flat(word: &str) -> Self {
        let letters: Vec<char> = word.chars().collect();
        let patterns = Direction::COMPASS
            .iter()
            .map(|&direction| {
                let (dr, dc) = direction.delta();
                let offsets = (0..letters.len() as isize)
                    .map(|i| Coordinate::new(dr * i, dc * i))
                    .collect();
                Pattern {
                    orientation: Orientation::Flat(direction),
                    offsets,
                }
            })
            .collect();

        Self { letters, patterns }
    }

    /// The word on both diagonals of a square, each read either way.
    /// Letters are doubled so one pattern covers both diagonals.
    pub fn crossed(word: &str) -> Self {
        let single: Vec<char> = word.chars().collect();
        let last = single.len() as isize - 1;

        let main = |direction: Direction| -> Vec<Coordinate> {
            (0..=last)
                .map(|i| match direction {
                    Direction::NorthWest => Coordinate::new(last - i, last - i),
                    _ => Coordinate::new(i, i),
                })
                .collect()
        };
        let anti = |direction: Direction| -> Vec<Coordinate> {
            (0..=last)
                .map(|i| match direction {
                    Direction::NorthEast => Coordinate::new(last - i, i),
                    _ => Coordinate::new(i, last - i),
                })
                .collect()
        };

        let patterns = iproduct!(
            [Direction::SouthEast, Direction::NorthWest],
            [Direction::SouthWest, Direction::NorthEast]
        )
        .map(|(m, a)| Pattern {
            orientation: Orientation::Cross(m, a),
            offsets: main(m).into_iter().chain(anti(a)).collect(),
        })
        .collect();

        let letters = single.iter().chain(single.iter()).copied().collect();
        Self { letters, patterns }
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSearch {
    grid: Vec<Vec<char>>,
}

impl WordSearch {
    pub fn new(grid: Vec<Vec<char>>) -> Result<Self, WordSearchError> {
        let expected = grid.first().map(Vec::len).ok_or(WordSearchError::Empty)?;
        if expected == 0 {
            return Err(WordSearchError::Empty);
        }
        if let Some((row, found)) = grid
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != expected)
        {
            return Err(WordSearchError::Ragged {
                row: row + 1,
                expected,
                found,
            });
        }

        debug!(rows = grid.len(), cols = expected, "created word search");
        Ok(Self { grid })
    }

    pub fn parse(input: &str) -> Result<Self, WordSearchError> {
        Self::new(
            input
                .lines()
                .map(|line| line.trim_end().chars().collect())
                .collect(),
        )
    }

    fn letter(&self, at: Coordinate) -> Option<char> {
        let row = usize::try_from(at.row).ok()?;
        let col = usize::try_from(at.col).ok()?;
        self.grid.get(row)?.get(col).copied()
    }

    pub fn is_pattern_at(&self, letters: &[char], pattern: &Pattern, at: Coordinate) -> bool {
        letters.len() == pattern.offsets.len()
            && pattern
                .offsets
                .iter()
                .zip(letters)
                .all(|(offset, &letter)| self.letter(at.offset(*offset)) == Some(letter))
    }

    #[tracing::instrument(skip_all)]
    pub fn find_word(&self, word: &Word) -> Vec<Match> {
        let rows = self.grid.len() as isize;
        let cols = self.grid.first().map_or(0, Vec::len) as isize;

        let matches: Vec<Match> = iproduct!(0..rows, 0..cols, word.patterns.iter())
            .map(|(row, col, pattern)| (Coordinate::new(row, col), pattern))
            .filter(|(at, pattern)| self.is_pattern_at(&word.letters, pattern, *at))
            .map(|(location, pattern)| Match {
                orientation: pattern.orientation,
                location,
            })
            .collect();

        let text: String = word.letters.iter().collect();
        info!(word = %text, matches = matches.len(), "searched grid");
        matches
    }
}
