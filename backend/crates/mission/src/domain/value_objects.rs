//! Domain Value Objects
//!
//! Immutable value types for the mission domain.

use crate::error::{MissionError, MissionResult};
use serde::{Serialize, Serializer};

/// Validated title and points for an add or update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionDraft {
    title: String,
    points: u32,
}

impl MissionDraft {
    /// Fails with [`MissionError::EmptyTitle`] for blank titles
    pub fn new(title: impl Into<String>, points: u32) -> MissionResult<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(MissionError::EmptyTitle);
        }
        Ok(Self { title, points })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn points(&self) -> u32 {
        self.points
    }
}

/// Profile tier, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
            Level::Expert => "Expert",
        }
    }
}

/// Badge earned once the point total reaches its threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Achievement {
    Points200,
    Points500,
    Points1000,
}

impl Achievement {
    /// All badges, ascending by threshold
    pub const ALL: [Achievement; 3] = [
        Achievement::Points200,
        Achievement::Points500,
        Achievement::Points1000,
    ];

    pub const fn threshold(&self) -> u64 {
        match self {
            Achievement::Points200 => 200,
            Achievement::Points500 => 500,
            Achievement::Points1000 => 1000,
        }
    }

    /// Badge identifier as shown to clients
    pub const fn label(&self) -> &'static str {
        match self {
            Achievement::Points200 => "🏅200+ points",
            Achievement::Points500 => "🎖 500+ points",
            Achievement::Points1000 => "🏆 1000+ points",
        }
    }
}

impl Serialize for Achievement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
