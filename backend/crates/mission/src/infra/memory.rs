//! In-Memory Repository Implementation

use crate::domain::entities::Mission;
use crate::domain::repository::MissionRepository;
use crate::domain::value_objects::MissionDraft;
use crate::error::{MissionError, MissionResult};
use kernel::id::MissionId;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::time::Instant;

/// Process-local mission store
///
/// One coarse lock guards the whole table and is held for the full
/// duration of every operation. `list` copies the table under the lock, so
/// its hold time grows with the number of missions.
#[derive(Debug)]
pub struct InMemoryMissionRepository {
    table: Mutex<MissionTable>,
}

#[derive(Debug)]
struct MissionTable {
    missions: Vec<Mission>,
    next_id: MissionId,
}

impl MissionTable {
    fn position(&self, id: MissionId) -> MissionResult<usize> {
        self.missions
            .iter()
            .position(|m| m.id == id)
            .ok_or(MissionError::NotFound(id))
    }
}

impl Default for InMemoryMissionRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryMissionRepository {
    /// Empty store; the first id handed out is 1
    pub fn new() -> Self {
        Self {
            table: Mutex::new(MissionTable {
                missions: Vec::new(),
                next_id: MissionId::new(1),
            }),
        }
    }

    /// Store pre-loaded with the two starter missions
    pub fn seeded() -> Self {
        let missions = vec![
            Mission {
                id: MissionId::new(1),
                title: "Hello, World!".to_string(),
                points: 100,
            },
            Mission {
                id: MissionId::new(2),
                title: "FizzBuzz".to_string(),
                points: 200,
            },
        ];
        Self {
            table: Mutex::new(MissionTable {
                missions,
                next_id: MissionId::new(3),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MissionTable> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MissionRepository for InMemoryMissionRepository {
    /// The deadline is not observed: nothing here waits on I/O
    async fn list(&self, _deadline: Instant) -> MissionResult<Vec<Mission>> {
        Ok(self.lock().missions.clone())
    }

    async fn add(&self, draft: &MissionDraft) -> MissionResult<Mission> {
        let mut table = self.lock();
        let id = table.next_id;
        table.next_id = id.next();

        let mission = Mission::from_draft(id, draft);
        table.missions.push(mission.clone());
        Ok(mission)
    }

    async fn get(&self, id: MissionId) -> MissionResult<Mission> {
        let table = self.lock();
        let index = table.position(id)?;
        Ok(table.missions[index].clone())
    }

    async fn update(&self, id: MissionId, draft: &MissionDraft) -> MissionResult<Mission> {
        let mut table = self.lock();
        let index = table.position(id)?;
        let mission = &mut table.missions[index];
        mission.apply(draft);
        Ok(mission.clone())
    }

    async fn delete(&self, id: MissionId) -> MissionResult<()> {
        let mut table = self.lock();
        let index = table.position(id)?;
        // `remove`, not `swap_remove`: insertion order is part of the contract
        table.missions.remove(index);
        Ok(())
    }
}
