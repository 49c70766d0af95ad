//! Mission Service
//!
//! Thin layer over a [`MissionRepository`]: validates drafts, bounds reads
//! by a deadline, and derives the profile from a fresh snapshot.

use crate::application::config::MissionConfig;
use crate::domain::entities::{Mission, Profile};
use crate::domain::repository::MissionRepository;
use crate::domain::services::build_profile;
use crate::domain::value_objects::MissionDraft;
use crate::error::{MissionError, MissionResult};
use kernel::id::MissionId;
use std::sync::Arc;
use tokio::time::Instant;

pub struct MissionService<R>
where
    R: MissionRepository,
{
    repo: Arc<R>,
    config: Arc<MissionConfig>,
}

impl<R> MissionService<R>
where
    R: MissionRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<MissionConfig>) -> Self {
        Self { repo, config }
    }

    /// All missions, or [`MissionError::Timeout`] once the list deadline passes
    ///
    /// The deadline is enforced here as well as handed to the store, so a
    /// backend that ignores it still cannot stall the request.
    pub async fn list(&self) -> MissionResult<Vec<Mission>> {
        let deadline = Instant::now() + self.config.list_timeout;
        tokio::time::timeout_at(deadline, self.repo.list(deadline))
            .await
            .map_err(|_| MissionError::Timeout)?
    }

    pub async fn get(&self, id: MissionId) -> MissionResult<Mission> {
        self.repo.get(id).await
    }

    pub async fn create(&self, title: String, points: u32) -> MissionResult<Mission> {
        let draft = MissionDraft::new(title, points)?;
        let mission = self.repo.add(&draft).await?;
        tracing::info!(id = %mission.id, title = %mission.title, "Added mission");
        Ok(mission)
    }

    pub async fn update(&self, id: MissionId, title: String, points: u32) -> MissionResult<Mission> {
        let draft = MissionDraft::new(title, points)?;
        let mission = self.repo.update(id, &draft).await?;
        tracing::info!(id = %mission.id, "Updated mission");
        Ok(mission)
    }

    pub async fn delete(&self, id: MissionId) -> MissionResult<()> {
        self.repo.delete(id).await?;
        tracing::info!(id = %id, "Deleted mission");
        Ok(())
    }

    /// Profile over the current snapshot; recomputed on every call
    pub async fn profile(&self) -> MissionResult<Profile> {
        let missions = self.list().await?;
        Ok(build_profile(&missions))
    }
}
