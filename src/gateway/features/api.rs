//! `/api/*`: no authentication here.
//!
//! Derives a best-effort client id for rate limiting. CORS and security
//! headers are tower-http layers on the API router (`middleware::cors`,
//! `middleware::security_headers`).

use crate::gateway::Middleware;
use crate::gateway::exchange::Exchange;
use crate::gateway::redirect::Redirect;
use crate::gateway::surface::path_is_under;

const API_PREFIX: &str = "/api";
const USER_AGENT_PREFIX_CHARS: usize = 50;

/// Caller fingerprint: first forwarded address plus a user-agent prefix.
///
/// Not an identity; two callers behind one proxy with the same browser collide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientId(pub String);

impl ClientId {
    pub fn derive(forwarded_for: Option<&str>, user_agent: Option<&str>) -> Self {
        let ip = forwarded_for
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("unknown");
        let agent: String = user_agent
            .unwrap_or("unknown")
            .chars()
            .take(USER_AGENT_PREFIX_CHARS)
            .collect();
        Self(format!("{ip}-{agent}"))
    }
}

pub struct ApiRoutes;

impl Middleware for ApiRoutes {
    fn name(&self) -> &'static str {
        "api"
    }

    fn evaluate(&self, exchange: &mut Exchange<'_>) -> Option<Redirect> {
        if !path_is_under(exchange.path(), API_PREFIX) {
            return None;
        }

        let ctx = exchange.ctx();
        let client_id = ClientId::derive(ctx.forwarded_for(), ctx.user_agent());
        tracing::debug!(client_id = %client_id.0, path = ctx.path(), "api request");

        exchange.set_client_id(client_id);

        None
    }
}
