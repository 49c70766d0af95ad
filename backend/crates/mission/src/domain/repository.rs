//! Repository Traits
//!
//! The store contract. Implementations live in the infrastructure layer.

use crate::domain::entities::Mission;
use crate::domain::value_objects::MissionDraft;
use crate::error::MissionResult;
use kernel::id::MissionId;
use tokio::time::Instant;

/// Mission store
///
/// Ids are assigned by the store, strictly increasing, and never reused.
/// Writes either commit fully or report an error.
#[trait_variant::make(MissionRepository: Send)]
pub trait LocalMissionRepository {
    /// Snapshot of all missions in insertion order
    ///
    /// Backends that do I/O must give up at `deadline` with
    /// [`MissionError::Timeout`](crate::error::MissionError::Timeout).
    async fn list(&self, deadline: Instant) -> MissionResult<Vec<Mission>>;

    /// Store a new mission under the next id
    async fn add(&self, draft: &MissionDraft) -> MissionResult<Mission>;

    async fn get(&self, id: MissionId) -> MissionResult<Mission>;

    /// Replace title and points; NotFound if the id is absent
    async fn update(&self, id: MissionId, draft: &MissionDraft) -> MissionResult<Mission>;

    /// NotFound if the id is absent
    async fn delete(&self, id: MissionId) -> MissionResult<()>;
}
