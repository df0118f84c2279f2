//! A collection of offsets for variable-length data.

use std::ops::Range;

/// A collection of offsets for variable-length data.
///
/// Stores a sequence of monotonically non-decreasing offsets, where each
/// pair of adjacent offsets defines the byte range of a single item. The
/// first offset is always present and marks the start of the first item.
#[derive(Debug, Clone, PartialEq)]
pub struct Offsets(Vec<u64>);

impl Offsets {
    /// Creates a new empty `Offsets` collection with a single offset at 0.
    pub fn new() -> Offsets {
        Self::with_capacity(0)
    }

    /// Creates a new `Offsets` collection with space reserved for
    /// `capacity` items.
    pub fn with_capacity(capacity: usize) -> Offsets {
        let mut buf = Vec::with_capacity(capacity + 1);
        buf.push(0u64);
        Offsets(buf)
    }

    /// Creates a new collection of `len + 1` zero offsets.
    pub fn zeroed(len: usize) -> Offsets {
        Offsets(vec![0u64; len + 1])
    }

    /// Returns the number of items represented by these offsets.
    #[inline]
    pub fn item_count(&self) -> usize {
        self.0.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    /// Returns the last offset, which marks the end of the last item.
    #[inline]
    pub fn last(&self) -> u64 {
        *self.0.last().unwrap()
    }

    /// Returns the byte range of the item at the given index.
    #[inline]
    pub fn range_at(&self, index: usize) -> Range<u64> {
        self.0[index]..self.0[index + 1]
    }

    /// Adds a new item by incrementing the last offset by the given length.
    #[inline]
    pub fn push_length(&mut self, len: usize) {
        let last = self.last();
        self.0.push(last + len as u64);
    }

    /// Appends `count` zero-sized items to the collection.
    pub fn push_empty(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        let last = self.last();
        self.0.resize(self.0.len() + count, last);
    }
}

impl Default for Offsets {
    fn default() -> Self {
        Offsets::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_length() {
        let mut offsets = Offsets::new();
        offsets.push_length(1);
        offsets.push_length(0);
        offsets.push_length(2);
        assert_eq!(offsets.item_count(), 3);
        assert_eq!(offsets.as_slice(), &[0, 1, 1, 3]);
        assert_eq!(offsets.range_at(0), 0..1);
        assert_eq!(offsets.range_at(1), 1..1);
        assert_eq!(offsets.range_at(2), 1..3);
        assert_eq!(offsets.last(), 3);
    }

    #[test]
    fn test_push_empty() {
        let mut offsets = Offsets::new();
        offsets.push_length(4);
        offsets.push_empty(2);
        assert_eq!(offsets.item_count(), 3);
        assert_eq!(offsets.as_slice(), &[0, 4, 4, 4]);
    }

    #[test]
    fn test_zeroed() {
        let offsets = Offsets::zeroed(3);
        assert_eq!(offsets.item_count(), 3);
        assert_eq!(offsets.last(), 0);
    }
}
