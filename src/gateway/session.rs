/*
 * Responsibility
 * - cookie の credential を 1 リクエストにつき一度だけ検証する
 * - 検証済みの結果 (AuthContext) はこのモジュールでしか作れない
 * - handler は middleware が extensions に入れた AuthContext だけを見る
 */
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::context::RequestContext;
use crate::services::auth::credential::{ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
use crate::services::auth::{CredentialError, Role, RoleResolver, VerifiedCredential};

/// Verified session of the current request.
///
/// There is no public constructor: holding one means the credential's
/// signature, expiry and role assignment were checked by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    user_id: Option<Uuid>,
    role: Role,
    expires_at: DateTime<Utc>,
}

impl AuthContext {
    fn from_credential(cred: VerifiedCredential) -> Self {
        Self {
            user_id: cred.user_id,
            role: cred.role,
            expires_at: cred.expires_at,
        }
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.user_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

#[derive(Debug)]
pub enum Authentication {
    /// No credential cookie.
    Anonymous,
    /// A credential was present but could not be trusted or mapped.
    Rejected(CredentialError),
    Authenticated(AuthContext),
}

impl Authentication {
    pub(super) fn resolve(ctx: &RequestContext, resolver: &RoleResolver) -> Self {
        if ctx.cookie(REFRESH_TOKEN_COOKIE).is_some() {
            tracing::debug!("refresh token cookie present");
        }

        let Some(token) = ctx.cookie(ACCESS_TOKEN_COOKIE) else {
            return Self::Anonymous;
        };

        match resolver.verify(token) {
            Ok(cred) => {
                tracing::debug!(
                    role_id = %cred.role_id,
                    role = %cred.role,
                    surface = ctx.surface().as_str(),
                    "access credential verified"
                );
                Self::Authenticated(AuthContext::from_credential(cred))
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    host = ctx.hostname(),
                    path = ctx.path(),
                    "access credential rejected"
                );
                Self::Rejected(err)
            }
        }
    }

    pub fn session(&self) -> Option<&AuthContext> {
        match self {
            Self::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}
