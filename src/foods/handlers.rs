use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::jwt::AuthUser,
    foods::{
        dto::{AddFoodRequest, AnalyzeRequest, AnalyzeResponse},
        repo::FoodEntry,
    },
    state::AppState,
};

pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/foods", post(add_food).get(list_foods))
        .route("/foods/latest", get(latest_food))
        .route("/foods/analyze", post(analyze))
}

/// POST /foods — append one immutable entry to the user's food log.
#[instrument(skip(state, payload))]
pub async fn add_food(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<AddFoodRequest>,
) -> Result<(StatusCode, Json<FoodEntry>), (StatusCode, String)> {
    if payload.food_name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Food name is required".into()));
    }

    let entry = FoodEntry::insert(
        &state.db,
        user_id,
        payload.food_name.trim(),
        payload.energy_kcal,
        payload.protein_g,
        payload.carb_g,
        payload.fat_g,
        payload.fibre_g,
        payload.glycemic_index,
    )
    .await
    .map_err(|e| {
        error!(error = %e, user_id = %user_id, "food entry insert failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    info!(user_id = %user_id, food = %entry.food_name, "food logged");
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /foods — full log, newest first.
#[instrument(skip(state))]
pub async fn list_foods(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<FoodEntry>>, (StatusCode, String)> {
    let foods = FoodEntry::list_by_user(&state.db, user_id)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %user_id, "food list failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;
    Ok(Json(foods))
}

/// GET /foods/latest — most recently logged entry.
#[instrument(skip(state))]
pub async fn latest_food(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<FoodEntry>, (StatusCode, String)> {
    let entry = FoodEntry::latest_by_user(&state.db, user_id)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %user_id, "latest food lookup failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?
        .ok_or((StatusCode::NOT_FOUND, "No food found".to_string()))?;
    Ok(Json(entry))
}

/// POST /foods/analyze — dataset lookup first, LLM on miss, zeroed facts when
/// the provider is unreachable. A missing food is not a server error.
#[instrument(skip(state, payload))]
pub async fn analyze(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, (StatusCode, String)> {
    let query = payload.food.trim();
    if query.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Food name is required".into()));
    }

    if let Some(rec) = state.foods.find(query) {
        info!(food = %query, "found in food dataset");
        return Ok(Json(AnalyzeResponse::from_record(query.to_string(), rec)));
    }

    match state.nutrition.nutrition_facts(query).await {
        Ok(facts) => {
            info!(food = %query, "nutrition facts from llm");
            Ok(Json(AnalyzeResponse::from_facts(query.to_string(), facts)))
        }
        Err(e) => {
            warn!(food = %query, error = %e, "llm nutrition lookup failed");
            Ok(Json(AnalyzeResponse::unavailable(query.to_string())))
        }
    }
}
