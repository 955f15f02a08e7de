use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::gateway::session::AuthContext;
use crate::state::AppState;

/// Handler で AuthContext を受け取るための extractor
/// gateway middleware が request.extensions() に insert 済みである前提
/// 見つからない場合は 401 (credential なし / 検証失敗 / middleware 未設定)
pub struct SessionExtractor(pub AuthContext);

impl FromRequestParts<AppState> for SessionExtractor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .map(SessionExtractor)
            .ok_or(AppError::Unauthorized)
    }
}
