//! Surface-wide authorization.
//!
//! A guard owns one protected surface and enforces "authenticated and holding
//! the surface's role" before any feature unit sees the request. Feature units
//! never check roles, so these guards are the only role boundary between the
//! client app and the internal tools.

use super::Middleware;
use super::config::GuardConfig;
use super::exchange::Exchange;
use super::redirect::Redirect;
use super::session::Authentication;
use super::surface::path_is_under;

pub struct SubdomainGuard {
    name: &'static str,
    config: GuardConfig,
}

impl SubdomainGuard {
    pub fn new(name: &'static str, config: GuardConfig) -> Self {
        Self { name, config }
    }

    fn is_public(&self, path: &str) -> bool {
        self.config
            .public_routes
            .iter()
            .any(|prefix| path_is_under(path, prefix))
    }

    fn to_login(&self, path: &str) -> Redirect {
        Redirect::with_return_to(&self.config.login_url, path)
    }
}

impl Middleware for SubdomainGuard {
    fn name(&self) -> &'static str {
        self.name
    }

    fn evaluate(&self, exchange: &mut Exchange<'_>) -> Option<Redirect> {
        if exchange.surface() != self.config.surface {
            return None;
        }

        let path = exchange.path();
        if self.is_public(path) {
            return None;
        }

        match exchange.authentication() {
            Authentication::Anonymous => Some(self.to_login(path)),
            // A genuine credential without a usable role: logging in again won't help.
            Authentication::Rejected(err) if err.is_authentic() => {
                Some(Redirect::to(&self.config.access_denied_url))
            }
            Authentication::Rejected(_) => Some(self.to_login(path)),
            Authentication::Authenticated(session)
                if session.role() != self.config.required_role =>
            {
                tracing::info!(
                    guard = self.name,
                    role = %session.role(),
                    required = %self.config.required_role,
                    "role not allowed on surface"
                );
                Some(Redirect::to(&self.config.access_denied_url))
            }
            Authentication::Authenticated(_) => None,
        }
    }
}
