//! Domain Entities

use crate::domain::value_objects::{Achievement, Level, MissionDraft};
use kernel::id::MissionId;

/// Mission entity - a stored record with a title and a point value
///
/// The id is assigned by the store and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mission {
    pub id: MissionId,
    pub title: String,
    pub points: u32,
}

impl Mission {
    pub fn from_draft(id: MissionId, draft: &MissionDraft) -> Self {
        Self {
            id,
            title: draft.title().to_string(),
            points: draft.points(),
        }
    }

    /// Overwrite the mutable fields; the id is kept
    pub fn apply(&mut self, draft: &MissionDraft) {
        self.title = draft.title().to_string();
        self.points = draft.points();
    }
}

/// Profile - derived summary over all current missions, never persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub total_points: u64,
    pub level: Level,
    pub achievements: Vec<Achievement>,
}
