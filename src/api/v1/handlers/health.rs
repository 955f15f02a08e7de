/*
 * Responsibility
 * - GET /api/health (疎通用)
 * - guard の public route に入っているので credential なしで届く
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
