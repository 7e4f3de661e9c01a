use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{error, instrument};

use crate::{
    auth::jwt::AuthUser,
    intake::{
        dto::{AddIntakeRequest, DashboardResponse},
        repo::{bucket_date, DailyIntake},
    },
    state::AppState,
};

pub fn intake_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/intake", post(add_intake))
        .route("/dashboard", get(dashboard))
}

/// POST /dashboard/intake — add a logged food's macros to today's totals.
#[instrument(skip(state, payload))]
pub async fn add_intake(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<AddIntakeRequest>,
) -> Result<Json<DashboardResponse>, (StatusCode, String)> {
    let today = bucket_date(OffsetDateTime::now_utc());
    let record = DailyIntake::add(&state.db, user_id, today, payload.delta())
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %user_id, "daily intake update failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;
    Ok(Json(record.into()))
}

/// GET /dashboard — today's running totals, zeros before the first log.
#[instrument(skip(state))]
pub async fn dashboard(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<DashboardResponse>, (StatusCode, String)> {
    let today = bucket_date(OffsetDateTime::now_utc());
    let record = DailyIntake::find_for_day(&state.db, user_id, today)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %user_id, "dashboard lookup failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?
        .unwrap_or_else(|| DailyIntake::empty(user_id, today));
    Ok(Json(record.into()))
}
