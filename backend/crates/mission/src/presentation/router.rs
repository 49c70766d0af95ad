//! Mission Router

use crate::application::MissionService;
use crate::application::config::MissionConfig;
use crate::domain::repository::MissionRepository;
use crate::presentation::handlers::{self, MissionAppState};
use axum::{Router, routing::get};
use std::sync::Arc;

/// Create the mission router for any repository implementation
pub fn mission_router<R>(repo: Arc<R>, config: MissionConfig) -> Router
where
    R: MissionRepository + Send + Sync + 'static,
{
    let state = MissionAppState {
        service: Arc::new(MissionService::new(repo, Arc::new(config))),
    };

    Router::new()
        .route(
            "/missions",
            get(handlers::list_missions::<R>).post(handlers::create_mission::<R>),
        )
        .route(
            "/missions/{id}",
            get(handlers::get_mission::<R>)
                .put(handlers::update_mission::<R>)
                .delete(handlers::delete_mission::<R>),
        )
        .route("/profile", get(handlers::get_profile::<R>))
        .fallback(handlers::not_found)
        .with_state(state)
}
