use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use tracing::{error, info, instrument, warn};

use crate::{
    auth::jwt::AuthUser,
    state::AppState,
    vision::dto::{DetectFoodResponse, DetectedMacros, MedicalReportResponse},
};

pub fn vision_routes() -> Router<AppState> {
    Router::new()
        .route("/medical", post(medical_report))
        .route("/detect", post(detect_food))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB
}

struct UploadedFile {
    body: Bytes,
    content_type: String,
    filename: String,
}

/// Pulls the `file` field out of a multipart body.
async fn read_file_field(mut mp: Multipart) -> Result<UploadedFile, (StatusCode, String)> {
    while let Ok(Some(field)) = mp.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".into());
        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "upload".into());
        let body = field
            .bytes()
            .await
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
        return Ok(UploadedFile {
            body,
            content_type,
            filename,
        });
    }
    Err((StatusCode::BAD_REQUEST, "No file uploaded".into()))
}

/// Strips the model's markdown leftovers and trims every line.
fn format_report(text: &str) -> String {
    text.replace('*', "")
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
}

/// POST /medical — OCR the uploaded report, then rewrite it in plain language.
#[instrument(skip(state, mp))]
pub async fn medical_report(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    mp: Multipart,
) -> Result<Json<MedicalReportResponse>, (StatusCode, String)> {
    let file = read_file_field(mp).await?;

    let text = state
        .vision
        .extract_text(file.body, &file.content_type, &file.filename)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %user_id, "ocr relay failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to process the image.".to_string(),
            )
        })?;

    let simplified = state.nutrition.simplify_report(&text).await.map_err(|e| {
        error!(error = %e, user_id = %user_id, "report simplification failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to process the image.".to_string(),
        )
    })?;

    info!(user_id = %user_id, "medical report summarized");
    Ok(Json(MedicalReportResponse {
        extracted_text: format_report(&simplified),
    }))
}

/// POST /detect — detect the food in a photo, then resolve macros from the
/// dataset with an LLM fallback.
#[instrument(skip(state, mp))]
pub async fn detect_food(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    mp: Multipart,
) -> Result<Json<DetectFoodResponse>, (StatusCode, String)> {
    let file = read_file_field(mp).await?;

    let label = state
        .vision
        .detect_food(file.body, &file.content_type, &file.filename)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %user_id, "food detection relay failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Processing failed".to_string())
        })?;

    let macros = if let Some(rec) = state.foods.find(&label) {
        DetectedMacros::from_record(rec)
    } else {
        match state.nutrition.nutrition_facts(&label).await {
            Ok(facts) => DetectedMacros::from_facts(facts),
            Err(e) => {
                warn!(error = %e, food = %label, "llm fallback failed after detection");
                DetectedMacros::unavailable()
            }
        }
    };

    info!(user_id = %user_id, food = %label, source = macros.source, "food detected");
    Ok(Json(DetectFoodResponse {
        detected_food: label,
        macros,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_report_strips_asterisks_and_trims() {
        let raw = "  **Hemoglobin** is normal.  \n   * Sugar slightly high  \n";
        assert_eq!(
            format_report(raw),
            "Hemoglobin is normal.\nSugar slightly high"
        );
    }

    #[test]
    fn format_report_keeps_plain_text() {
        assert_eq!(format_report("all clear"), "all clear");
    }
}
