//! Group construction.
//!
//! Turns an `InputPayload` into an `OutputPayload` in two phases: classify
//! the batch (see [`crate::mode`]), then build groups for the chosen mode.

use tracing::{debug, trace};

use group_types::{GroupData, InputPayload, OutputPayload, Person};

use crate::config::PackagerConfig;
use crate::error::PackError;
use crate::mode::{detect_mode, PackageMode, SegmentIndex};

/// Appended after every member label in a paired group's segment label
pub const SEGMENT_ID_SEPARATOR: char = ';';

/// Segment number given to the single group in all-one-group mode
const UNIFIED_SEGMENT_NUMBER: u64 = 1;

/// Check that the parallel input lists line up.
pub fn validate(input: &InputPayload) -> Result<(), PackError> {
    let count = input.segment_number.len();

    if input.string_list.len() != count {
        return Err(PackError::PreconditionViolation(format!(
            "string_list has {} entries but segment_number has {}",
            input.string_list.len(),
            count
        )));
    }

    if input.has_segment_ids() && input.segment_id.len() != count {
        return Err(PackError::PreconditionViolation(format!(
            "segment_id has {} entries but segment_number has {}",
            input.segment_id.len(),
            count
        )));
    }

    Ok(())
}

/// Package a batch of segmented texts into groups.
///
/// The file id is passed through unchanged. The input is not modified.
pub fn pack(input: &InputPayload) -> Result<OutputPayload, PackError> {
    validate(input)?;

    let (mode, index) = detect_mode(&input.segment_number);

    debug!(
        file_id = %input.file_id,
        units = input.len(),
        distinct = index.len(),
        mode = %mode,
        "Packaging segments"
    );

    let mut output = OutputPayload::new(input.file_id.clone());
    match mode {
        PackageMode::AllOneGroup => pack_all_one_group(input, &mut output)?,
        PackageMode::PairedSegments => pack_paired_segments(input, &index, &mut output)?,
    }

    Ok(output)
}

/// Every text becomes a member labeled with its segment number.
fn pack_all_one_group(input: &InputPayload, output: &mut OutputPayload) -> Result<(), PackError> {
    let mut group = GroupData::new();

    for (text, number) in input.string_list.iter().zip(&input.segment_number) {
        trace!(segment_number = number, "Adding member");
        group.add_person(Person::with_text(number.to_string(), text.clone()));
    }

    let segment_id = input.segment_id.first().cloned();

    debug!(members = group.len(), "Created unified group");
    output.push(group, UNIFIED_SEGMENT_NUMBER, segment_id)?;
    Ok(())
}

/// One group per segment number, members in input order.
///
/// Members are labeled with their segment id, or with their position in the
/// group when the batch has no ids. Each label plus a separator is
/// accumulated into the group's segment label; the trailing separator is
/// kept.
fn pack_paired_segments(
    input: &InputPayload,
    index: &SegmentIndex,
    output: &mut OutputPayload,
) -> Result<(), PackError> {
    for (number, positions) in index.iter() {
        let mut group = GroupData::new();
        let mut segment_label = String::new();

        for (member, &position) in positions.iter().enumerate() {
            let label = if input.has_segment_ids() {
                input.segment_id[position].clone()
            } else {
                member.to_string()
            };

            trace!(segment_number = number, position, label = %label, "Adding member");

            segment_label.push_str(&label);
            segment_label.push(SEGMENT_ID_SEPARATOR);
            group.add_person(Person::with_text(label, input.string_list[position].clone()));
        }

        debug!(
            segment_number = number,
            members = group.len(),
            label = %segment_label,
            "Created paired group"
        );
        output.push(group, number, Some(segment_label))?;
    }
    Ok(())
}

/// Stateless packager handle for hosts that drive components through a
/// common lifecycle.
#[derive(Debug, Clone, Default)]
pub struct GroupPackager {
    config: PackagerConfig,
}

impl GroupPackager {
    pub fn new(config: PackagerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PackagerConfig {
        &self.config
    }

    /// Package one batch. See [`pack`].
    pub fn pack(&self, input: &InputPayload) -> Result<OutputPayload, PackError> {
        pack(input)
    }

    /// End-of-run hook. Nothing is buffered, so the payload is returned as is.
    pub fn finish_up(&self, payload: OutputPayload) -> OutputPayload {
        payload
    }
}
