/*
 * Responsibility
 * - 環境変数の読み込み (role map, 検証鍵, surface の domain, guard の public routes など)
 * - 設定値のバリデーション (不足・不正なら起動失敗)
 * - GatewayConfig (immutable) の組み立て
 */
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::gateway::config::{DomainSettings, Features, GatewayConfig, GuardConfig};
use crate::middleware::http::HttpLimits;
use crate::services::auth::RoleMap;
use crate::services::auth::credential::{CredentialPolicy, VerificationKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
    #[error("conflicting configuration: {0} and {1} are mutually exclusive")]
    Conflict(&'static str, &'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub static_dir: PathBuf,
    pub http: HttpLimits,

    pub gateway: GatewayConfig,

    pub verification_key: VerificationKey,
    pub credential_policy: CredentialPolicy,
    pub role_map: RoleMap,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source. `from_env` is this over the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(s) => s.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = lookup("APP_ENV")
            .map(|v| AppEnv::parse(&v))
            .unwrap_or(AppEnv::Development);

        let static_dir = lookup("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./public"));

        let mut http = HttpLimits::default();
        if let Some(v) = lookup("HTTP_BODY_LIMIT_BYTES") {
            http.body_limit_bytes = v
                .parse()
                .map_err(|_| ConfigError::Invalid("HTTP_BODY_LIMIT_BYTES"))?;
        }
        if let Some(v) = lookup("HTTP_TIMEOUT_SECONDS") {
            let secs: u64 = v
                .parse()
                .map_err(|_| ConfigError::Invalid("HTTP_TIMEOUT_SECONDS"))?;
            http.timeout = Duration::from_secs(secs);
        }

        let features = Features::without(&lookup("GATEWAY_DISABLED_FEATURES").unwrap_or_default())
            .map_err(|_| ConfigError::Invalid("GATEWAY_DISABLED_FEATURES"))?;

        let domains = DomainSettings {
            base_domain: non_empty(lookup("GATEWAY_BASE_DOMAIN")),
            scheme: match non_empty(lookup("GATEWAY_REDIRECT_SCHEME")) {
                None => "https".to_string(),
                Some(s) if s == "http" || s == "https" => s,
                Some(_) => return Err(ConfigError::Invalid("GATEWAY_REDIRECT_SCHEME")),
            },
        };

        let mut app_guard = GuardConfig::app();
        if let Some(routes) = lookup("GATEWAY_APP_PUBLIC_ROUTES") {
            app_guard = app_guard.with_public_routes(
                parse_routes(&routes).ok_or(ConfigError::Invalid("GATEWAY_APP_PUBLIC_ROUTES"))?,
            );
        }
        let mut tools_guard = GuardConfig::tools();
        if let Some(routes) = lookup("GATEWAY_TOOLS_PUBLIC_ROUTES") {
            tools_guard = tools_guard.with_public_routes(
                parse_routes(&routes).ok_or(ConfigError::Invalid("GATEWAY_TOOLS_PUBLIC_ROUTES"))?,
            );
        }

        let secret = non_empty(lookup("AUTH_JWT_SECRET"));
        let public_key_pem =
            non_empty(lookup("AUTH_JWT_PUBLIC_KEY_PEM")).map(|pem| pem.replace("\\n", "\n"));
        let verification_key = match (secret, public_key_pem) {
            (Some(secret), None) => VerificationKey::Hmac(secret),
            (None, Some(pem)) => VerificationKey::EdPem(pem),
            (Some(_), Some(_)) => {
                return Err(ConfigError::Conflict(
                    "AUTH_JWT_SECRET",
                    "AUTH_JWT_PUBLIC_KEY_PEM",
                ));
            }
            (None, None) => return Err(ConfigError::Missing("AUTH_JWT_SECRET")),
        };

        let leeway_seconds = match lookup("ACCESS_TOKEN_LEEWAY_SECONDS") {
            Some(v) => v
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("ACCESS_TOKEN_LEEWAY_SECONDS"))?,
            None => 60,
        };

        let credential_policy = CredentialPolicy {
            audience: non_empty(lookup("AUTH_AUDIENCE")),
            issuer: non_empty(lookup("AUTH_ISSUER")),
            leeway_seconds,
        };

        let role_map = RoleMap::for_env(app_env)
            .merge_entries(&lookup("ROLE_MAP").unwrap_or_default())
            .map_err(|_| ConfigError::Invalid("ROLE_MAP"))?;

        Ok(Self {
            addr,
            app_env,
            static_dir,
            http,
            gateway: GatewayConfig {
                features,
                domains,
                app_guard,
                tools_guard,
            },
            verification_key,
            credential_policy,
            role_map,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Comma-separated absolute path prefixes.
fn parse_routes(value: &str) -> Option<Vec<String>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.starts_with('/').then(|| s.to_string()))
        .collect()
}
