//! HTTP Handlers

use crate::application::MissionService;
use crate::domain::repository::MissionRepository;
use crate::error::MissionResult;
use crate::presentation::dto::{MissionRequest, MissionResponse, ProfileResponse};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_extra::extract::WithRejection;
use kernel::error::app_error::AppError;
use kernel::id::MissionId;
use std::sync::Arc;

/// Shared state for mission handlers
pub struct MissionAppState<R>
where
    R: MissionRepository + Send + Sync + 'static,
{
    pub service: Arc<MissionService<R>>,
}

// Manual impl: a derive would require `R: Clone`
impl<R> Clone for MissionAppState<R>
where
    R: MissionRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

type IdPath = WithRejection<Path<MissionId>, AppError>;
type MissionBody = WithRejection<Json<MissionRequest>, AppError>;

/// GET /missions
pub async fn list_missions<R>(
    State(state): State<MissionAppState<R>>,
) -> MissionResult<Json<Vec<MissionResponse>>>
where
    R: MissionRepository + Send + Sync + 'static,
{
    let missions = state.service.list().await?;
    Ok(Json(missions.into_iter().map(Into::into).collect()))
}

/// GET /missions/{id}
pub async fn get_mission<R>(
    State(state): State<MissionAppState<R>>,
    WithRejection(Path(id), _): IdPath,
) -> MissionResult<Json<MissionResponse>>
where
    R: MissionRepository + Send + Sync + 'static,
{
    let mission = state.service.get(id).await?;
    Ok(Json(mission.into()))
}

/// POST /missions
pub async fn create_mission<R>(
    State(state): State<MissionAppState<R>>,
    WithRejection(Json(req), _): MissionBody,
) -> MissionResult<impl IntoResponse>
where
    R: MissionRepository + Send + Sync + 'static,
{
    let created = state.service.create(req.title, req.points).await?;
    Ok((StatusCode::CREATED, Json(MissionResponse::from(created))))
}

/// PUT /missions/{id}
pub async fn update_mission<R>(
    State(state): State<MissionAppState<R>>,
    WithRejection(Path(id), _): IdPath,
    WithRejection(Json(req), _): MissionBody,
) -> MissionResult<Json<MissionResponse>>
where
    R: MissionRepository + Send + Sync + 'static,
{
    let updated = state
        .service
        .update(id, req.title, req.points)
        .await?;
    Ok(Json(updated.into()))
}

/// DELETE /missions/{id}
pub async fn delete_mission<R>(
    State(state): State<MissionAppState<R>>,
    WithRejection(Path(id), _): IdPath,
) -> MissionResult<StatusCode>
where
    R: MissionRepository + Send + Sync + 'static,
{
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /profile
pub async fn get_profile<R>(
    State(state): State<MissionAppState<R>>,
) -> MissionResult<Json<ProfileResponse>>
where
    R: MissionRepository + Send + Sync + 'static,
{
    let profile = state.service.profile().await?;
    Ok(Json(profile.into()))
}

/// Any unmatched path
pub async fn not_found() -> AppError {
    AppError::not_found("Not found")
}
