/*
 * Responsibility
 * - session の response DTO
 */
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::gateway::session::AuthContext;
use crate::services::auth::Role;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user_id: Option<Uuid>,
    pub role: Role,
    pub expires_at: DateTime<Utc>,
}

impl From<&AuthContext> for SessionResponse {
    fn from(session: &AuthContext) -> Self {
        Self {
            user_id: session.user_id(),
            role: session.role(),
            expires_at: session.expires_at(),
        }
    }
}
