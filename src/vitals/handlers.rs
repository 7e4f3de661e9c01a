use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::jwt::AuthUser,
    goals::{
        calculator::{self, Gender, GoalInput},
        repo::GoalProfile,
    },
    state::AppState,
    vitals::{
        dto::{AddVitalsRequest, AddVitalsResponse, VitalsHistoryResponse},
        repo::VitalsReading,
    },
};

pub fn vitals_routes() -> Router<AppState> {
    Router::new().route("/vitals", post(add_vitals).get(list_vitals))
}

/// POST /vitals — record a reading and refresh the goal profile with the new
/// weight (BMI, calories and macros are re-derived through the calculator).
#[instrument(skip(state, payload))]
pub async fn add_vitals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<AddVitalsRequest>,
) -> Result<(StatusCode, Json<AddVitalsResponse>), (StatusCode, String)> {
    if !(payload.sugar_reading > 0.0) || !(payload.weight_reading > 0.0) {
        return Err((StatusCode::BAD_REQUEST, "All fields are required.".into()));
    }

    let existing = GoalProfile::find_by_user(&state.db, user_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| {
            warn!(user_id = %user_id, "vitals before goal onboarding");
            (
                StatusCode::NOT_FOUND,
                "User details not found. Please set up your profile first.".to_string(),
            )
        })?;

    let gender: Gender = existing.gender.parse().map_err(|e| {
        error!(user_id = %user_id, gender = %existing.gender, "stored gender is invalid");
        internal(e)
    })?;

    let numbers = calculator::compute(GoalInput {
        height_cm: existing.height,
        weight_kg: payload.weight_reading,
        age_years: existing.age,
        gender,
        activity_level: existing.activity_level,
        weight_goal_kg_per_week: existing.weight_goal,
    })
    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let profile = GoalProfile::upsert(
        &state.db,
        user_id,
        existing.height,
        payload.weight_reading,
        existing.age,
        gender.as_str(),
        existing.activity_level,
        existing.weight_goal,
        &numbers,
    )
    .await
    .map_err(internal)?;

    let reading = VitalsReading::insert(
        &state.db,
        user_id,
        payload.sugar_reading,
        payload.weight_reading,
    )
    .await
    .map_err(internal)?;

    info!(
        user_id = %user_id,
        weight = payload.weight_reading,
        "vitals recorded, goal profile refreshed"
    );
    Ok((
        StatusCode::CREATED,
        Json(AddVitalsResponse {
            vitals: reading,
            goal_profile: profile.into(),
        }),
    ))
}

/// GET /vitals — full history newest first, with the latest pulled out.
#[instrument(skip(state))]
pub async fn list_vitals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<VitalsHistoryResponse>, (StatusCode, String)> {
    let vitals = VitalsReading::list_by_user(&state.db, user_id)
        .await
        .map_err(internal)?;
    let latest = vitals.first().cloned();
    Ok(Json(VitalsHistoryResponse { vitals, latest }))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
