//! Durable storage for the result of a finished session.
//!
//! A single JSON object file acts as the key-value store; the session writes
//! exactly one slot, [`LAST_COLOR_KEY`], holding the final color as a
//! lowercase hex string. Unrelated keys are preserved on write so the file
//! can be shared with other tools. A missing or unreadable file is treated
//! as empty rather than as an error.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::color::Rgb;

/// Slot holding the most recently elicited color.
pub const LAST_COLOR_KEY: &str = "lastColor";

/// Key-value store backed by one JSON file.
#[derive(Debug, Clone)]
pub struct ResultStore {
    path: PathBuf,
}

impl ResultStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist `color` under [`LAST_COLOR_KEY`], keeping other keys intact.
    pub fn save_last_color(&self, color: Rgb) -> io::Result<()> {
        let mut slots = self.read_slots();
        slots.insert(LAST_COLOR_KEY.to_string(), color.to_hex());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = fs::File::create(&self.path)?;
        serde_json::to_writer_pretty(file, &slots)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))
    }

    /// The stored color, if a valid one has been saved. Exposed for resume
    /// features; the session core itself never reads it.
    pub fn last_color(&self) -> Option<Rgb> {
        self.read_slots()
            .get(LAST_COLOR_KEY)
            .and_then(|hex| Rgb::from_hex(hex).ok())
    }

    fn read_slots(&self) -> BTreeMap<String, String> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(_) => return BTreeMap::new(),
        };
        match serde_json::from_str(&contents) {
            Ok(slots) => slots,
            Err(err) => {
                tracing::warn!(
                    "result store {} is corrupt, starting empty: {err}",
                    self.path.display()
                );
                BTreeMap::new()
            }
        }
    }
}
