//! Source range interval map
//!
//! Maps source ranges to values and answers containment queries such as
//! "which ranges contain line 12, column 4", innermost first. Entries are
//! keyed by start line, start column, end line, end column through two
//! levels of ordered maps (start position, then end position), so both
//! ends of a query are range scans.
//!
//! # Example
//! ```
//! use urilex::range_map::{Position, Range, RangeMap};
//!
//! let mut map = RangeMap::new();
//! map.insert(Range::new(Position::new(0, 0), Position::new(10, 0)), "function");
//! map.insert(Range::new(Position::new(2, 4), Position::new(3, 8)), "loop");
//!
//! let hits: Vec<_> = map.find_containing(Position::new(2, 6)).map(|(_, v)| *v).collect();
//! assert_eq!(hits, ["loop", "function"]);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Position in a document (0-indexed), ordered line first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.character)
    }
}

/// A span between two positions, both ends inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    /// Create a range, swapping the endpoints if they are out of order
    pub fn new(a: Position, b: Position) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// A zero-width range at `pos`
    pub fn empty(pos: Position) -> Self {
        Self { start: pos, end: pos }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos <= self.end
    }

    pub fn contains_range(&self, other: &Range) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn intersects(&self, other: &Range) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Values keyed by source range
#[derive(Debug, Clone)]
pub struct RangeMap<T> {
    by_start: BTreeMap<Position, BTreeMap<Position, T>>,
    len: usize,
}

impl<T> Default for RangeMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RangeMap<T> {
    pub fn new() -> Self {
        Self {
            by_start: BTreeMap::new(),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.by_start.clear();
        self.len = 0;
    }

    /// Insert a value, returning the one previously stored for `range`
    pub fn insert(&mut self, range: Range, value: T) -> Option<T> {
        let previous = self
            .by_start
            .entry(range.start)
            .or_default()
            .insert(range.end, value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    pub fn get(&self, range: &Range) -> Option<&T> {
        self.by_start.get(&range.start)?.get(&range.end)
    }

    pub fn get_mut(&mut self, range: &Range) -> Option<&mut T> {
        self.by_start.get_mut(&range.start)?.get_mut(&range.end)
    }

    pub fn remove(&mut self, range: &Range) -> Option<T> {
        let ends = self.by_start.get_mut(&range.start)?;
        let removed = ends.remove(&range.end)?;
        if ends.is_empty() {
            self.by_start.remove(&range.start);
        }
        self.len -= 1;
        Some(removed)
    }

    /// All entries, ordered by start then end
    pub fn iter(&self) -> impl Iterator<Item = (Range, &T)> + '_ {
        self.by_start.iter().flat_map(|(start, ends)| {
            ends.iter().map(move |(end, value)| (Range { start: *start, end: *end }, value))
        })
    }

    /// Entries whose range contains `pos`, innermost first: the latest
    /// start comes first, and among equal starts the earliest end.
    pub fn find_containing(&self, pos: Position) -> impl Iterator<Item = (Range, &T)> + '_ {
        self.by_start.range(..=pos).rev().flat_map(move |(start, ends)| {
            ends.range(pos..)
                .map(move |(end, value)| (Range { start: *start, end: *end }, value))
        })
    }

    /// The smallest entry containing `pos`
    pub fn find_innermost(&self, pos: Position) -> Option<(Range, &T)> {
        self.find_containing(pos).next()
    }

    /// Entries overlapping `range`, ordered by start then end
    pub fn find_intersecting(&self, range: Range) -> impl Iterator<Item = (Range, &T)> + '_ {
        self.by_start.range(..=range.end).flat_map(move |(start, ends)| {
            ends.range(range.start..)
                .map(move |(end, value)| (Range { start: *start, end: *end }, value))
        })
    }
}

impl<T> FromIterator<(Range, T)> for RangeMap<T> {
    fn from_iter<I: IntoIterator<Item = (Range, T)>>(iter: I) -> Self {
        let mut map = RangeMap::new();
        for (range, value) in iter {
            map.insert(range, value);
        }
        map
    }
}
