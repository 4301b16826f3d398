//! Payload types exchanged with the packager's host.
//!
//! The input payload carries parallel lists: texts, segment numbers and an
//! optional list of segment ids. The output payload carries the produced
//! groups with their own parallel segment numbers and labels. Both carry a
//! file id that the packager passes through untouched.

use serde::{Deserialize, Serialize};

use crate::error::GroupTypesError;
use crate::group::GroupData;

/// One input item, as seen when walking the parallel lists together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputUnit {
    pub text: String,
    pub segment_number: u64,
    pub segment_id: Option<String>,
}

impl InputUnit {
    pub fn new(text: impl Into<String>, segment_number: u64) -> Self {
        Self {
            text: text.into(),
            segment_number,
            segment_id: None,
        }
    }

    pub fn with_segment_id(mut self, segment_id: impl Into<String>) -> Self {
        self.segment_id = Some(segment_id.into());
        self
    }
}

/// Input batch of segmented texts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputPayload {
    /// Identifier of the originating file or batch (passed through)
    #[serde(default)]
    pub file_id: String,

    /// Raw texts
    #[serde(default)]
    pub string_list: Vec<String>,

    /// Segment number of each text
    #[serde(default)]
    pub segment_number: Vec<u64>,

    /// Segment id of each text, or empty when the batch carries no ids
    #[serde(default)]
    pub segment_id: Vec<String>,
}

impl InputPayload {
    /// Create a payload without segment ids
    pub fn new(file_id: impl Into<String>, string_list: Vec<String>, segment_number: Vec<u64>) -> Self {
        Self {
            file_id: file_id.into(),
            string_list,
            segment_number,
            segment_id: Vec::new(),
        }
    }

    /// Attach segment ids
    pub fn with_segment_ids(mut self, segment_id: Vec<String>) -> Self {
        self.segment_id = segment_id;
        self
    }

    /// Build a payload from units.
    ///
    /// Either every unit carries a segment id or none does; a partial set of
    /// ids cannot be expressed as parallel lists and is rejected.
    pub fn from_units(
        file_id: impl Into<String>,
        units: Vec<InputUnit>,
    ) -> Result<Self, GroupTypesError> {
        let with_ids = units.iter().filter(|u| u.segment_id.is_some()).count();
        if with_ids != 0 && with_ids != units.len() {
            return Err(GroupTypesError::PreconditionViolation(format!(
                "{} of {} units carry a segment_id",
                with_ids,
                units.len()
            )));
        }

        let mut payload = Self {
            file_id: file_id.into(),
            ..Self::default()
        };
        for unit in units {
            payload.string_list.push(unit.text);
            payload.segment_number.push(unit.segment_number);
            if let Some(id) = unit.segment_id {
                payload.segment_id.push(id);
            }
        }
        Ok(payload)
    }

    /// Number of input units (length of the segment number list)
    pub fn len(&self) -> usize {
        self.segment_number.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segment_number.is_empty()
    }

    /// True if the batch carries segment ids
    pub fn has_segment_ids(&self) -> bool {
        !self.segment_id.is_empty()
    }

    /// Walk the parallel lists as units. Stops at the shortest list.
    pub fn units(&self) -> impl Iterator<Item = InputUnit> + '_ {
        self.string_list
            .iter()
            .zip(self.segment_number.iter())
            .enumerate()
            .map(move |(i, (text, &segment_number))| InputUnit {
                text: text.clone(),
                segment_number,
                segment_id: self.segment_id.get(i).cloned(),
            })
    }

    /// Serialize to JSON bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, GroupTypesError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Deserialize from JSON bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, GroupTypesError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Borrowed view of one output position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputEntry<'a> {
    pub group: &'a GroupData,
    pub segment_number: u64,
    pub segment_id: Option<&'a str>,
}

/// Output batch of groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputPayload {
    /// Identifier received on input, unchanged
    pub file_id: String,

    /// Produced groups
    pub groups: Vec<GroupData>,

    /// Segment number of each group
    pub segment_number: Vec<u64>,

    /// Segment label of each group. Empty when a single unified group was
    /// produced from a batch without ids.
    #[serde(default)]
    pub segment_id: Vec<String>,
}

impl OutputPayload {
    /// Create an empty output carrying the given file id
    pub fn new(file_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            ..Self::default()
        }
    }

    /// Append a group with its segment number and optional label.
    ///
    /// Labels pair with groups by position, so an unlabeled group is only
    /// accepted as the first and only entry.
    pub fn push(
        &mut self,
        group: GroupData,
        segment_number: u64,
        segment_id: Option<String>,
    ) -> Result<(), GroupTypesError> {
        if self.segment_id.len() != self.groups.len() {
            return Err(GroupTypesError::MisalignedOutput(format!(
                "cannot add segment {} after an unlabeled group",
                segment_number
            )));
        }
        if segment_id.is_none() && !self.groups.is_empty() {
            return Err(GroupTypesError::MisalignedOutput(format!(
                "segment {} has no label but {} labeled groups precede it",
                segment_number,
                self.groups.len()
            )));
        }

        self.groups.push(group);
        self.segment_number.push(segment_number);
        if let Some(id) = segment_id {
            self.segment_id.push(id);
        }
        Ok(())
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate groups together with their segment number and label
    ///
    /// Labels are reported only when every group has one.
    pub fn entries(&self) -> impl Iterator<Item = OutputEntry<'_>> {
        let labeled = self.segment_id.len() == self.groups.len();
        self.groups
            .iter()
            .zip(self.segment_number.iter())
            .enumerate()
            .map(move |(i, (group, &segment_number))| OutputEntry {
                group,
                segment_number,
                segment_id: if labeled {
                    self.segment_id.get(i).map(String::as_str)
                } else {
                    None
                },
            })
    }

    /// Total number of texts across all groups
    pub fn text_count(&self) -> usize {
        self.groups.iter().map(GroupData::text_count).sum()
    }

    /// Serialize to JSON bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, GroupTypesError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Deserialize from JSON bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, GroupTypesError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
