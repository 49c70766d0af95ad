//! Application Configuration

use std::time::Duration;

/// Mission application configuration
#[derive(Debug, Clone)]
pub struct MissionConfig {
    /// Deadline for reads of the full mission list (also used by /profile)
    pub list_timeout: Duration,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            list_timeout: Duration::from_secs(2),
        }
    }
}

impl MissionConfig {
    pub fn with_list_timeout(list_timeout: Duration) -> Self {
        Self { list_timeout }
    }
}
