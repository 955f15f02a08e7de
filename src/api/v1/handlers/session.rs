/*
 * Responsibility
 * - GET /api/v1/session
 * - gateway が検証した session (role / user / 有効期限) をそのまま返す
 */
use axum::Json;

use crate::api::v1::dto::session::SessionResponse;
use crate::api::v1::extractors::SessionExtractor;

pub async fn current_session(SessionExtractor(session): SessionExtractor) -> Json<SessionResponse> {
    Json(SessionResponse::from(&session))
}
