use std::ops::{Index, Range};

/// Represents an area within source text.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub struct Region {
    /// The beginning of the range, inclusive.
    pub begin: usize,
    /// The ending of the range, exclusive.
    pub end: usize,
}

impl Region {
    /// Create a new Region from the given range.
    pub fn new(position: Range<usize>) -> Self {
        Self {
            begin: position.start,
            end: position.end,
        }
    }

    /// Create a [`Region`] covering the single character at `offset`.
    ///
    /// Delimiters are always one byte wide, so this is the region of a
    /// brace or parenthesis.
    pub fn at(offset: usize) -> Self {
        Self {
            begin: offset,
            end: offset + 1,
        }
    }

    /// Return the number of bytes covered by this [`Region`].
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    /// Return true if this [`Region`] covers no text.
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Return true if the given [`Region`] lies entirely inside this `Region`.
    pub fn contains(&self, other: Self) -> bool {
        self.begin <= other.begin && other.end <= self.end
    }

    /// Return true if the two regions share text but neither contains the other.
    pub fn straddles(&self, other: Self) -> bool {
        let overlaps = self.begin < other.end && other.begin < self.end;

        overlaps && !self.contains(other) && !other.contains(*self)
    }

    /// Return the region between the first and last character of this one,
    /// that is, the body between two delimiters.
    pub fn inner(&self) -> Self {
        Self {
            begin: self.begin + 1,
            end: self.end.saturating_sub(1).max(self.begin + 1),
        }
    }

    /// Return this [`Region`] moved left by `offset`.
    pub fn rebase(&self, offset: usize) -> Self {
        Self {
            begin: self.begin - offset,
            end: self.end - offset,
        }
    }
}

impl Index<Region> for str {
    type Output = str;

    fn index(&self, region: Region) -> &Self::Output {
        let Region { begin, end } = region;

        &self[begin..end]
    }
}

impl From<Range<usize>> for Region {
    fn from(value: Range<usize>) -> Self {
        Self {
            begin: value.start,
            end: value.end,
        }
    }
}
