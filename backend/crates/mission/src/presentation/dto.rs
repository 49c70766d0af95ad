//! API DTOs (Data Transfer Objects)

use crate::domain::entities::{Mission, Profile};
use crate::domain::value_objects::{Achievement, Level};
use kernel::id::MissionId;
use serde::{Deserialize, Serialize};

/// Body for POST /missions and PUT /missions/{id}
///
/// Unknown fields (including a client-supplied `id`) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct MissionRequest {
    pub title: String,
    pub points: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct MissionResponse {
    pub id: MissionId,
    pub title: String,
    pub points: u32,
}

impl From<Mission> for MissionResponse {
    fn from(mission: Mission) -> Self {
        Self {
            id: mission.id,
            title: mission.title,
            points: mission.points,
        }
    }
}

/// Response for GET /profile
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub total_points: u64,
    pub level: Level,
    pub achievements: Vec<Achievement>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            total_points: profile.total_points,
            level: profile.level,
            achievements: profile.achievements,
        }
    }
}
