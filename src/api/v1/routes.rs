/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - 認証・認可は gateway が済ませている。handler は extractor で AuthContext を受けるだけ
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::session::current_session;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/session", get(current_session))
}
