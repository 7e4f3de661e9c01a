use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{error, info, instrument};

use super::dto::RecommendRequest;
use crate::state::AppState;

pub fn recommend_routes() -> Router<AppState> {
    Router::new().route("/recommendations", post(recommendations))
}

/// POST /recommendations — relay the food name to the ML recommendation
/// model and forward its payload unchanged.
#[instrument(skip(state, payload))]
pub async fn recommendations(
    State(state): State<AppState>,
    Json(payload): Json<RecommendRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let food = payload.food.trim();
    if food.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Food name is required".into()));
    }

    let recommendations = state.recommend.recommend(food).await.map_err(|e| {
        error!(error = %e, food = %food, "recommendation relay failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to get recommendations".to_string(),
        )
    })?;

    info!(food = %food, "recommendations served");
    Ok(Json(recommendations))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_food_is_rejected() {
        let state = AppState::fake();
        let res =
            recommendations(State(state), Json(RecommendRequest { food: "  ".into() })).await;
        let (status, msg) = res.err().unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(msg, "Food name is required");
    }

    #[tokio::test]
    async fn forwards_the_upstream_payload() {
        let state = AppState::fake();
        let Json(body) = recommendations(
            State(state),
            Json(RecommendRequest {
                food: "idli".into(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(body["recommendations"][0], "dal tadka");
    }
}
