//! End-to-end test infrastructure for the group packager.
//!
//! Provides payload builders and a helper that drives a payload through the
//! same JSON path the CLI uses.

use std::io::Cursor;

use group_cli::run_pack;
use group_types::{InputPayload, OutputPayload};

/// Build an input payload from string slices.
///
/// Pass an empty `ids` slice for a batch without segment ids.
pub fn payload(file_id: &str, texts: &[&str], numbers: &[u64], ids: &[&str]) -> InputPayload {
    InputPayload::new(file_id, to_strings(texts), numbers.to_vec()).with_segment_ids(to_strings(ids))
}

/// Create a transcript-like batch: `turns` texts per conversation, each
/// conversation sharing one segment number, speakers labeled `s{n}`.
pub fn conversation_batch(file_id: &str, conversations: u64, turns: usize) -> InputPayload {
    let mut texts = Vec::new();
    let mut numbers = Vec::new();
    let mut ids = Vec::new();

    for conversation in 1..=conversations {
        for turn in 0..turns {
            texts.push(format!("conversation {conversation} turn {turn}"));
            numbers.push(conversation);
            ids.push(format!("s{turn}"));
        }
    }

    InputPayload::new(file_id, texts, numbers).with_segment_ids(ids)
}

/// Serialize a payload to JSON, run it through the CLI pack path, and
/// return both the returned and the written output.
pub fn pack_via_json(input: &InputPayload) -> Result<(OutputPayload, OutputPayload), String> {
    let raw = serde_json::to_vec(input).map_err(|e| e.to_string())?;
    let mut written = Vec::new();

    let returned =
        run_pack(Cursor::new(raw), &mut written, false).map_err(|e| format!("{e:#}"))?;
    let decoded: OutputPayload = serde_json::from_slice(&written).map_err(|e| e.to_string())?;

    Ok((returned, decoded))
}

/// Convert string slices to owned strings.
pub fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
