//! Immutable gateway configuration, built once at startup and handed to the
//! chain composer.

use thiserror::Error;

use super::surface::Surface;
use crate::services::auth::Role;

pub const LOGIN_URL: &str = "/auth/login";
pub const ACCESS_DENIED_URL: &str = "/auth/access-denied";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown gateway feature: {0}")]
pub struct UnknownFeature(pub String);

/// Which optional units take part in the chain. Guards are always on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    pub domain_redirect: bool,
    pub api: bool,
    pub auth_routes: bool,
    pub internal_tools: bool,
    pub client_app: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            domain_redirect: true,
            api: true,
            auth_routes: true,
            internal_tools: true,
            client_app: true,
        }
    }
}

impl Features {
    /// Start from everything enabled and switch off the comma-separated names.
    pub fn without(list: &str) -> Result<Self, UnknownFeature> {
        let mut features = Self::default();
        for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match name {
                "domain" | "domain_redirect" => features.domain_redirect = false,
                "api" => features.api = false,
                "auth" | "auth_routes" => features.auth_routes = false,
                "internal_tools" => features.internal_tools = false,
                "client_app" => features.client_app = false,
                other => return Err(UnknownFeature(other.to_string())),
            }
        }
        Ok(features)
    }
}

/// How absolute cross-surface redirect targets are built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainSettings {
    /// Registrable domain shared by all surfaces, e.g. `elevalucro.com.br`.
    /// When unset it is derived from the request host.
    pub base_domain: Option<String>,
    pub scheme: String,
}

impl Default for DomainSettings {
    fn default() -> Self {
        Self {
            base_domain: None,
            scheme: "https".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardConfig {
    pub surface: Surface,
    pub required_role: Role,
    /// Path prefixes exempt from the check, in evaluation order.
    pub public_routes: Vec<String>,
    pub login_url: String,
    pub access_denied_url: String,
}

impl GuardConfig {
    pub fn app() -> Self {
        Self {
            surface: Surface::ClientApp,
            required_role: Role::ClientSide,
            public_routes: default_public_routes(),
            login_url: LOGIN_URL.to_string(),
            access_denied_url: ACCESS_DENIED_URL.to_string(),
        }
    }

    pub fn tools() -> Self {
        Self {
            surface: Surface::InternalTools,
            required_role: Role::BpoSide,
            public_routes: default_public_routes(),
            login_url: LOGIN_URL.to_string(),
            access_denied_url: ACCESS_DENIED_URL.to_string(),
        }
    }

    pub fn with_public_routes(mut self, routes: Vec<String>) -> Self {
        self.public_routes = routes;
        self
    }
}

fn default_public_routes() -> Vec<String> {
    vec!["/auth".to_string(), "/api/health".to_string()]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub features: Features,
    pub domains: DomainSettings,
    pub app_guard: GuardConfig,
    pub tools_guard: GuardConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            features: Features::default(),
            domains: DomainSettings::default(),
            app_guard: GuardConfig::app(),
            tools_guard: GuardConfig::tools(),
        }
    }
}
