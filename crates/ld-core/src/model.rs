//! Roster, history and award records
//!
//! Field names serialize camelCase so stored buckets stay readable by the
//! browser build of the app.

use serde::{Deserialize, Serialize};

/// Participant id (assigned once, never reused)
pub type ParticipantId = u64;

/// A registered participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    /// Zero-padded ordinal, derived from roster position
    pub number: String,
}

impl Participant {
    pub fn new(id: ParticipantId, name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            number: number.into(),
        }
    }
}

/// One completed single-mode draw
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Display timestamp
    pub time: String,
    /// Winning number as shown at draw time
    pub result: String,
    /// Winner name snapshot
    pub name: String,
}

/// A prize slot with a winner quota
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub id: String,
    pub name: String,
    /// Number of winners this award takes
    pub count: u32,
    /// Display hint only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Award {
    pub fn new(id: impl Into<String>, name: impl Into<String>, count: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            count,
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// One winner of one award, with snapshots of the award name and participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardWinner {
    pub award_id: String,
    pub award_name: String,
    pub participant: Participant,
    pub time: String,
}

/// Multi-award mode configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiAwardSettings {
    pub enabled: bool,
    /// Draw order
    pub awards: Vec<Award>,
}

/// Stored award pointer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AwardCursor {
    pub current_award_index: usize,
}
