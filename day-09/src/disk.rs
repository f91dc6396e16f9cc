use std::collections::VecDeque;
use std::fmt;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;
use tracing::debug;

// region: miette error handling
#[derive(Debug, Error, Diagnostic)]
#[error("Invalid character in input")]
#[diagnostic(code(day9::invalid_char), help("Input must contain only digits 0-9"))]
pub struct InvalidCharError {
    #[source_code]
    src: String,

    #[label("invalid character found here")]
    span: SourceSpan,

    pub character: char,
}

impl InvalidCharError {
    fn new(input: &str, pos: usize, character: char) -> Self {
        Self {
            src: input.to_string(),
            span: (pos, character.len_utf8()).into(),
            character,
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum DiskError {
    #[error("Empty input")]
    #[diagnostic(code(day9::empty_input), help("Provide a dense disk map"))]
    Empty,

    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidChar(#[from] InvalidCharError),

    #[error("Checksum overflowed")]
    #[diagnostic(code(day9::checksum_overflow))]
    ChecksumOverflow,
}
// endregion

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    start: usize,
    len: usize,
}

/// Block-level view of the disk. `None` marks a free block, `Some(id)` a block
/// belonging to file `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disk {
    blocks: Vec<Option<usize>>,
}

impl Disk {
    /// Parses a dense disk map: digits alternate between file length and free length.
    pub fn parse(input: &str) -> Result<Self, DiskError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(DiskError::Empty);
        }

        let mut blocks = Vec::new();
        for (idx, (pos, c)) in input.char_indices().enumerate() {
            let size = c
                .to_digit(10)
                .ok_or_else(|| InvalidCharError::new(input, pos, c))? as usize;

            let block = (idx % 2 == 0).then_some(idx / 2);
            blocks.extend(std::iter::repeat(block).take(size));
        }

        debug!(blocks = blocks.len(), "parsed disk map");
        Ok(Self { blocks })
    }

    pub fn blocks(&self) -> &[Option<usize>] {
        &self.blocks
    }

    /// Moves single blocks from the end of the disk into the leftmost free block
    /// until no gap remains between file blocks.
    pub fn compact_blocks(&mut self) {
        let mut free: VecDeque<usize> = self
            .blocks
            .iter()
            .enumerate()
            .filter_map(|(pos, block)| block.is_none().then_some(pos))
            .collect();
        let mut data: Vec<usize> = self
            .blocks
            .iter()
            .enumerate()
            .filter_map(|(pos, block)| block.is_some().then_some(pos))
            .collect();

        while let (Some(&gap), Some(&last)) = (free.front(), data.last()) {
            if gap >= last {
                break;
            }
            self.blocks.swap(gap, last);
            free.pop_front();
            data.pop();
        }
    }

    /// Moves whole files, highest id first, into the leftmost free span that
    /// fits them. A file that fits nowhere to its left stays put.
    pub fn compact_files(&mut self) {
        let mut files: Vec<Span> = Vec::new();
        let mut gaps: Vec<Span> = Vec::new();

        let mut pos = 0;
        while pos < self.blocks.len() {
            let block = self.blocks[pos];
            let len = self.blocks[pos..]
                .iter()
                .take_while(|other| **other == block)
                .count();
            let span = Span { start: pos, len };
            match block {
                Some(id) => {
                    if files.len() <= id {
                        files.resize(id + 1, Span { start: 0, len: 0 });
                    }
                    files[id] = span;
                }
                None => gaps.push(span),
            }
            pos += len;
        }

        for (id, file) in files.iter().enumerate().rev() {
            let Some(gap) = gaps
                .iter_mut()
                .take_while(|gap| gap.start < file.start)
                .find(|gap| gap.len >= file.len)
            else {
                continue;
            };

            debug!(id, from = file.start, to = gap.start, "moving file");
            for offset in 0..file.len {
                self.blocks[gap.start + offset] = Some(id);
                self.blocks[file.start + offset] = None;
            }
            gap.start += file.len;
            gap.len -= file.len;
        }
    }

    /// Sum of position times file id over every file block.
    pub fn checksum(&self) -> Result<u64, DiskError> {
        self.blocks
            .iter()
            .enumerate()
            .filter_map(|(pos, block)| block.map(|id| (pos as u64).checked_mul(id as u64)))
            .try_fold(0_u64, |acc, product| {
                product
                    .and_then(|product| acc.checked_add(product))
                    .ok_or(DiskError::ChecksumOverflow)
            })
    }
}

impl fmt::Display for Disk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for block in &self.blocks {
            match block {
                Some(id) => write!(f, "{id}")?,
                None => write!(f, ".")?,
            }
        }
        Ok(())
    }
}
