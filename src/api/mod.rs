/*
 * Responsibility
 * - /api 配下の URL 構造 (health + v1)
 * - gateway の API feature が CORS / security header を付ける範囲
 */
use axum::{Router, routing::get};

use crate::error::AppError;
use crate::state::AppState;

pub mod v1;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(v1::handlers::health::health))
        .nest("/v1", v1::routes())
        .fallback(not_found)
}

async fn not_found() -> AppError {
    AppError::not_found("route")
}
