use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::jwt::AuthUser,
    goals::{
        calculator::{self, GoalInput},
        dto::{CalculateGoalsRequest, GoalProfileResponse},
        repo::GoalProfile,
    },
    state::AppState,
};

pub fn goal_routes() -> Router<AppState> {
    Router::new().route("/goals", post(calculate_goals).get(fetch_goals))
}

/// POST /goals — derive BMI/calorie/macro targets and upsert the profile.
#[instrument(skip(state, payload))]
pub async fn calculate_goals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<CalculateGoalsRequest>, JsonRejection>,
) -> Result<Json<GoalProfileResponse>, (StatusCode, String)> {
    // Missing or malformed fields are a client error, same as invalid values.
    let Json(payload) = payload.map_err(|e| {
        warn!(user_id = %user_id, error = %e, "malformed goals body");
        (StatusCode::BAD_REQUEST, e.body_text())
    })?;

    let input = GoalInput {
        height_cm: payload.height,
        weight_kg: payload.weight,
        age_years: payload.age,
        gender: payload.gender,
        activity_level: payload.activity_level,
        weight_goal_kg_per_week: payload.weight_goal,
    };

    let numbers = calculator::compute(input).map_err(|e| {
        warn!(user_id = %user_id, error = %e, "goal input rejected");
        (StatusCode::BAD_REQUEST, e.to_string())
    })?;

    let profile = GoalProfile::upsert(
        &state.db,
        user_id,
        payload.height,
        payload.weight,
        payload.age,
        payload.gender.as_str(),
        payload.activity_level,
        payload.weight_goal,
        &numbers,
    )
    .await
    .map_err(|e| {
        error!(error = %e, user_id = %user_id, "goal profile upsert failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    info!(
        user_id = %user_id,
        calories = numbers.adjusted_calories,
        "goal profile updated"
    );
    Ok(Json(profile.into()))
}

/// GET /goals — the stored profile with derived fields.
#[instrument(skip(state))]
pub async fn fetch_goals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<GoalProfileResponse>, (StatusCode, String)> {
    let profile = GoalProfile::find_by_user(&state.db, user_id)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %user_id, "goal profile lookup failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?
        .ok_or((StatusCode::NOT_FOUND, "Goal profile not found".to_string()))?;

    Ok(Json(profile.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::FromRef;
    use axum::http::{header, Request};
    use tower::ServiceExt;

    use crate::auth::jwt::JwtKeys;

    #[tokio::test]
    async fn missing_fields_reject_with_400() {
        let state = AppState::fake();
        let token = JwtKeys::from_ref(&state)
            .sign_access(uuid::Uuid::new_v4())
            .unwrap();
        let app = crate::app::build_app(state);

        let res = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/goals")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::from(r#"{"height":175}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
