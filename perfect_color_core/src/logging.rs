//! JSONL session journal.
//!
//! One line per accepted choice and one per finished session, appended to
//! `logs/session.jsonl`. Journaling is a UI-layer concern: the demos call
//! these after each round, and a failed write never interrupts a session.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::color::{delta_e76, rgb_to_lab};
use crate::session::{OptionLabel, RoundPresentation};

fn log_dir() -> io::Result<()> {
    fs::create_dir_all("logs")
}

fn append_json_line<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    serde_json::to_writer(&mut file, value)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    file.write_all(b"\n")
}

fn timestamp_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

/// Journal line for one accepted choice.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoundLogEntry {
    pub round_index: usize,
    pub chosen_hex: String,
    pub kept_current: bool,
    pub delta_from_previous: f32,
    pub predicted_total_rounds: usize,
    pub timestamp_ms: u128,
}

impl RoundLogEntry {
    /// Build the journal line for choosing `index` of `presentation`.
    /// Returns `None` for an out-of-range index, mirroring the controller's
    /// no-op.
    pub fn from_choice(presentation: &RoundPresentation, index: usize) -> Option<Self> {
        let chosen = presentation.options.get(index)?;
        let current = presentation
            .options
            .iter()
            .find(|option| option.label == OptionLabel::KeepCurrent)?;

        Some(Self {
            round_index: presentation.round_index,
            chosen_hex: chosen.color.to_hex(),
            kept_current: chosen.label == OptionLabel::KeepCurrent,
            delta_from_previous: delta_e76(rgb_to_lab(chosen.color), rgb_to_lab(current.color)),
            predicted_total_rounds: presentation.predicted_total_rounds,
            timestamp_ms: timestamp_ms(),
        })
    }
}

pub fn log_round(entry: &RoundLogEntry) -> io::Result<()> {
    log_dir()?;
    append_json_line("logs/session.jsonl", entry)
}

/// Journal line for a finished session.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionResultEntry {
    pub final_hex: String,
    pub rounds_taken: usize,
    pub predicted_total_rounds: usize,
    pub early_stop: bool,
    pub timestamp_ms: u128,
}

impl SessionResultEntry {
    pub fn new(
        final_hex: String,
        rounds_taken: usize,
        predicted_total_rounds: usize,
        max_rounds: usize,
    ) -> Self {
        Self {
            final_hex,
            rounds_taken,
            predicted_total_rounds,
            early_stop: rounds_taken < max_rounds,
            timestamp_ms: timestamp_ms(),
        }
    }
}

pub fn log_result(entry: &SessionResultEntry) -> io::Result<()> {
    log_dir()?;
    append_json_line("logs/session.jsonl", entry)
}
