use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use super::role_map::{Role, RoleMap};

/// Cookie carrying the access credential.
pub const ACCESS_TOKEN_COOKIE: &str = "sb-access-token";
/// Cookie carrying the refresh credential. Only its presence is observed.
pub const REFRESH_TOKEN_COOKIE: &str = "sb-refresh-token";

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("malformed credential")]
    Malformed,
    #[error("invalid credential signature")]
    InvalidSignature,
    #[error("credential expired")]
    Expired,
    #[error("credential carries no role claim")]
    MissingRole,
    #[error("unknown role id: {0}")]
    UnknownRole(String),
    #[error("credential rejected: {0}")]
    Jwt(jsonwebtoken::errors::Error),
}

impl CredentialError {
    /// True when the signature checked out and only the role assignment is unusable.
    pub fn is_authentic(&self) -> bool {
        matches!(self, Self::MissingRole | Self::UnknownRole(_))
    }
}

impl From<jsonwebtoken::errors::Error> for CredentialError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => Self::Malformed,
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Jwt(e),
        }
    }
}

/// Key material used to check credential signatures.
#[derive(Clone)]
pub enum VerificationKey {
    /// Shared HS256 secret (the hosted auth provider's default).
    Hmac(String),
    /// Ed25519 public key in PEM.
    EdPem(String),
}

impl std::fmt::Debug for VerificationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        match self {
            Self::Hmac(_) => f.write_str("VerificationKey::Hmac(..)"),
            Self::EdPem(_) => f.write_str("VerificationKey::EdPem(..)"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CredentialPolicy {
    pub audience: Option<String>,
    pub issuer: Option<String>,
    pub leeway_seconds: u64,
}

#[derive(Debug, Deserialize)]
struct CredentialClaims {
    #[serde(default)]
    sub: Option<String>,
    exp: i64,
    #[serde(default)]
    app_metadata: AppMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct AppMetadata {
    // Either a UUID string or a small integer depending on the environment.
    #[serde(default)]
    role: Option<serde_json::Value>,
}

impl AppMetadata {
    fn role_id(&self) -> Option<String> {
        match self.role.as_ref()? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// A credential whose signature, expiry and role assignment were all checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedCredential {
    pub user_id: Option<Uuid>,
    pub role_id: String,
    pub role: Role,
    pub expires_at: DateTime<Utc>,
}

/// Turns a bearer credential into a tenant [`Role`].
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct RoleResolver {
    decoding_key: DecodingKey,
    validation: Validation,
    role_map: Arc<RoleMap>,
}

impl std::fmt::Debug for RoleResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleResolver")
            .field("validation", &self.validation)
            .field("roles", &self.role_map.len())
            .finish()
    }
}

impl RoleResolver {
    pub fn new(
        key: &VerificationKey,
        policy: &CredentialPolicy,
        role_map: RoleMap,
    ) -> Result<Self, CredentialError> {
        let (decoding_key, algorithm) = match key {
            VerificationKey::Hmac(secret) => {
                (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256)
            }
            VerificationKey::EdPem(pem) => (
                DecodingKey::from_ed_pem(pem.as_bytes()).map_err(CredentialError::Jwt)?,
                Algorithm::EdDSA,
            ),
        };

        let mut validation = Validation::new(algorithm);
        validation.leeway = policy.leeway_seconds;
        validation.set_required_spec_claims(&["exp"]);
        match policy.audience.as_deref() {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }
        if let Some(iss) = policy.issuer.as_deref() {
            validation.set_issuer(&[iss]);
        }

        Ok(Self {
            decoding_key,
            validation,
            role_map: Arc::new(role_map),
        })
    }

    pub fn role_map(&self) -> &RoleMap {
        &self.role_map
    }

    /// Verify signature and expiry, then map `app_metadata.role` through the role table.
    pub fn verify(&self, token: &str) -> Result<VerifiedCredential, CredentialError> {
        if token.split('.').count() != 3 {
            return Err(CredentialError::Malformed);
        }

        let data =
            jsonwebtoken::decode::<CredentialClaims>(token, &self.decoding_key, &self.validation)?;
        let claims = data.claims;

        let expires_at =
            DateTime::<Utc>::from_timestamp(claims.exp, 0).ok_or(CredentialError::Malformed)?;

        let role_id = claims
            .app_metadata
            .role_id()
            .ok_or(CredentialError::MissingRole)?;

        let role = self
            .role_map
            .lookup(&role_id)
            .ok_or_else(|| CredentialError::UnknownRole(role_id.clone()))?;

        // Subjects are UUIDs upstream; anything else is kept out of the session.
        let user_id = claims.sub.as_deref().and_then(|s| Uuid::parse_str(s).ok());

        Ok(VerifiedCredential {
            user_id,
            role_id,
            role,
            expires_at,
        })
    }
}
