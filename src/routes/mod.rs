pub mod assignment_routes;
pub mod auth_routes;
pub mod belt_routes;
pub mod briefing_routes;
pub mod facility_routes;
pub mod invite_routes;
pub mod people_routes;
pub mod route_routes;
pub mod time_off_routes;
pub mod truck_routes;

use axum::{middleware::from_fn_with_state, response::Json, routing::get, Router};
use serde_json::{json, Value};
use std::time::Duration;
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::middleware::auth::auth_middleware;
use crate::middleware::cors::cors_layer;
use crate::state::AppState;

/// Router completo de la API: rutas públicas, rutas con JWT y capas comunes
pub fn create_app_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health_check))
        .nest("/auth", auth_routes::create_public_auth_router())
        .nest("/invites", invite_routes::create_public_invite_router());

    let protected = Router::new()
        .nest("/auth", auth_routes::create_auth_router())
        .nest("/people", people_routes::create_people_router())
        .nest("/belts", belt_routes::create_belt_router())
        .nest("/spots", belt_routes::create_spot_router())
        .nest("/assignments", assignment_routes::create_assignment_router())
        .nest("/templates", assignment_routes::create_template_router())
        .nest("/trucks", truck_routes::create_truck_router())
        .nest("/timeoff", time_off_routes::create_time_off_router())
        .nest("/routes", route_routes::create_route_router())
        .nest("/facility", facility_routes::create_facility_router())
        .nest("/briefing", briefing_routes::create_briefing_router())
        .nest("/invites", invite_routes::create_invite_router())
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    let timeout = Duration::from_secs(state.config.request_timeout_secs);
    let cors = cors_layer(&state.config);

    public
        .merge(protected)
        .layer(TimeoutLayer::new(timeout))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Health check
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
