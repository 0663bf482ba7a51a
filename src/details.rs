use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CardError;

/// Everything printed on the card, plus the header title and footer caption.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct CardDetails {
    pub title: String,
    pub name: String,
    pub roll_no: String,
    pub location: String,
    pub distance_learning: String,
    pub day_time: String,
    pub batch_no: String,
    pub signature: String,
}

impl Default for CardDetails {
    fn default() -> Self {
        Self {
            title: "PIAIC ID Card".to_string(),
            name: "Muhammad Danish".to_string(),
            roll_no: "PIAIC 345".to_string(),
            location: "Karachi".to_string(),
            distance_learning: "No".to_string(),
            day_time: "Sunday 09:00 to 01:00".to_string(),
            batch_no: "61 Morning".to_string(),
            signature: "Authorized Signature".to_string(),
        }
    }
}

impl CardDetails {
    /// Load details from a JSON object. Keys that are absent keep their defaults.
    pub fn load(path: &Path) -> Result<Self, CardError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw).map_err(|source| CardError::Details {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Body lines in the order they are printed, `"<Label>: <value>"`.
    pub fn field_lines(&self) -> Vec<String> {
        [
            ("Name", &self.name),
            ("Roll No", &self.roll_no),
            ("Location", &self.location),
            ("Distance Learning", &self.distance_learning),
            ("Day/Time", &self.day_time),
            ("Batch No", &self.batch_no),
        ]
        .iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect()
    }

    /// Text encoded into the QR code. Title and signature are not part of it.
    pub fn qr_payload(&self) -> String {
        [
            self.name.as_str(),
            self.roll_no.as_str(),
            self.location.as_str(),
            self.distance_learning.as_str(),
            self.day_time.as_str(),
            self.batch_no.as_str(),
        ]
        .join(", ")
    }
}
