//! Packaging mode detection.
//!
//! A single scan over the segment numbers records, for each distinct number,
//! the input positions that carry it. Keys keep first-seen order, which is
//! the order groups are emitted in.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How a batch is turned into groups. Chosen once per batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageMode {
    /// Every segment number is unique: one group, one member per text
    AllOneGroup,
    /// Some segment number repeats: one group per distinct number
    PairedSegments,
}

impl std::fmt::Display for PackageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackageMode::AllOneGroup => write!(f, "All One Group"),
            PackageMode::PairedSegments => write!(f, "Paired Segments"),
        }
    }
}

/// Segment number -> input positions, in first-seen key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentIndex {
    positions: IndexMap<u64, Vec<usize>>,
    total: usize,
}

impl SegmentIndex {
    /// Build the index from a list of segment numbers.
    pub fn build(segment_numbers: &[u64]) -> Self {
        let mut index = Self::default();
        for (position, &number) in segment_numbers.iter().enumerate() {
            index.record(number, position);
        }
        index
    }

    /// Record that `position` carries `number`.
    ///
    /// Returns true if the number had already been seen.
    pub fn record(&mut self, number: u64, position: usize) -> bool {
        self.total += 1;
        let positions = self.positions.entry(number).or_default();
        positions.push(position);
        positions.len() > 1
    }

    /// Number of distinct segment numbers
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of positions recorded
    pub fn total(&self) -> usize {
        self.total
    }

    /// True if any segment number was recorded more than once
    pub fn has_repeats(&self) -> bool {
        self.positions.len() < self.total
    }

    /// Positions recorded for a segment number
    pub fn positions(&self, number: u64) -> Option<&[usize]> {
        self.positions.get(&number).map(Vec::as_slice)
    }

    /// Iterate keys with their positions, in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (u64, &[usize])> {
        self.positions.iter().map(|(&k, v)| (k, v.as_slice()))
    }
}

/// Classify a batch and return the index built along the way.
pub fn detect_mode(segment_numbers: &[u64]) -> (PackageMode, SegmentIndex) {
    let index = SegmentIndex::build(segment_numbers);
    let mode = if index.has_repeats() {
        PackageMode::PairedSegments
    } else {
        PackageMode::AllOneGroup
    };
    (mode, index)
}
