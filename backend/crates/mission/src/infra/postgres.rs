//! PostgreSQL Repository Implementation

use crate::domain::entities::Mission;
use crate::domain::repository::MissionRepository;
use crate::domain::value_objects::MissionDraft;
use crate::error::{MissionError, MissionResult};
use kernel::id::MissionId;
use sqlx::PgPool;
use tokio::time::Instant;

/// PostgreSQL-backed repository
///
/// Ids come from a `BIGSERIAL` sequence, which never hands out a value
/// twice. Every write is a single statement, so a failed write leaves no
/// partial row behind.
#[derive(Clone)]
pub struct PgMissionRepository {
    pool: PgPool,
}

impl PgMissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl MissionRepository for PgMissionRepository {
    async fn list(&self, deadline: Instant) -> MissionResult<Vec<Mission>> {
        let query = sqlx::query_as::<_, MissionRow>(
            "SELECT id, title, points FROM missions ORDER BY id",
        )
        .fetch_all(&self.pool);

        let rows = tokio::time::timeout_at(deadline, query)
            .await
            .map_err(|_| MissionError::Timeout)??;

        tracing::debug!(count = rows.len(), "Missions listed");

        rows.into_iter().map(MissionRow::into_mission).collect()
    }

    async fn add(&self, draft: &MissionDraft) -> MissionResult<Mission> {
        let row = sqlx::query_as::<_, MissionRow>(
            r#"
            INSERT INTO missions (title, points)
            VALUES ($1, $2)
            RETURNING id, title, points
            "#,
        )
        .bind(draft.title())
        .bind(i64::from(draft.points()))
        .fetch_one(&self.pool)
        .await?;

        row.into_mission()
    }

    async fn get(&self, id: MissionId) -> MissionResult<Mission> {
        let Some(key) = to_key(id) else {
            return Err(MissionError::NotFound(id));
        };

        sqlx::query_as::<_, MissionRow>("SELECT id, title, points FROM missions WHERE id = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(MissionError::NotFound(id))?
            .into_mission()
    }

    async fn update(&self, id: MissionId, draft: &MissionDraft) -> MissionResult<Mission> {
        let Some(key) = to_key(id) else {
            return Err(MissionError::NotFound(id));
        };

        sqlx::query_as::<_, MissionRow>(
            r#"
            UPDATE missions
            SET title = $1, points = $2
            WHERE id = $3
            RETURNING id, title, points
            "#,
        )
        .bind(draft.title())
        .bind(i64::from(draft.points()))
        .bind(key)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(MissionError::NotFound(id))?
        .into_mission()
    }

    async fn delete(&self, id: MissionId) -> MissionResult<()> {
        let Some(key) = to_key(id) else {
            return Err(MissionError::NotFound(id));
        };

        let deleted = sqlx::query("DELETE FROM missions WHERE id = $1")
            .bind(key)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(MissionError::NotFound(id));
        }
        Ok(())
    }
}

/// Ids beyond `i64::MAX` cannot exist in a `BIGSERIAL` column
fn to_key(id: MissionId) -> Option<i64> {
    i64::try_from(id.get()).ok()
}

// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct MissionRow {
    id: i64,
    title: String,
    points: i64,
}

impl MissionRow {
    fn into_mission(self) -> MissionResult<Mission> {
        let id = u64::try_from(self.id)
            .map_err(|_| MissionError::Internal(format!("negative mission id {}", self.id)))?;
        let points = u32::try_from(self.points).map_err(|_| {
            MissionError::Internal(format!("points out of range for mission {}", self.id))
        })?;

        Ok(Mission {
            id: MissionId::new(id),
            title: self.title,
            points,
        })
    }
}
