//! Request-routing / access-control gateway.
//!
//! Every request is classified into a surface (public site, client app,
//! internal tools) and then run through a fixed chain of units. The first unit
//! that answers with a redirect wins; when none does, the request passes
//! through to the page/API handler.
//!
//! Chain order:
//! domain-redirect -> app-guard -> tools-guard -> api -> auth-routes
//! -> internal-tools -> client-app
//!
//! The guards come before every feature unit: features only ask "is there a
//! session", the guards are the ones that check the role.

pub mod config;
pub mod context;
pub mod exchange;
pub mod features;
pub mod guard;
pub mod redirect;
pub mod session;
pub mod surface;

use std::sync::Arc;

use crate::services::auth::RoleResolver;
use config::GatewayConfig;
use context::RequestContext;
use exchange::Exchange;
use features::api::{ApiRoutes, ClientId};
use features::auth_routes::AuthRoutes;
use features::client_app::ClientAppRoutes;
use features::domain::DomainRedirect;
use features::internal_tools::InternalToolsRoutes;
use guard::SubdomainGuard;
use redirect::Redirect;
use session::AuthContext;

pub use config::Features;
pub use surface::Surface;

/// One unit of the chain.
pub trait Middleware: Send + Sync {
    fn name(&self) -> &'static str;

    /// `None` means "continue with the next unit".
    fn evaluate(&self, exchange: &mut Exchange<'_>) -> Option<Redirect>;
}

#[derive(Debug)]
pub enum Outcome {
    Redirect(Redirect),
    Pass(Passthrough),
}

/// What the handler side gets when no unit redirected.
#[derive(Debug, Default)]
pub struct Passthrough {
    pub session: Option<AuthContext>,
    pub client_id: Option<ClientId>,
}

pub struct Gateway {
    chain: Vec<Box<dyn Middleware>>,
    resolver: Arc<RoleResolver>,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("chain", &self.unit_names())
            .field("resolver", &self.resolver)
            .finish()
    }
}

impl Gateway {
    pub fn new(config: GatewayConfig, resolver: Arc<RoleResolver>) -> Self {
        let GatewayConfig {
            features,
            domains,
            app_guard,
            tools_guard,
        } = config;
        let login_url = app_guard.login_url.clone();
        let tools_login_url = tools_guard.login_url.clone();

        let mut chain: Vec<Box<dyn Middleware>> = Vec::with_capacity(7);
        if features.domain_redirect {
            chain.push(Box::new(DomainRedirect::new(domains)));
        }
        chain.push(Box::new(SubdomainGuard::new("app-guard", app_guard)));
        chain.push(Box::new(SubdomainGuard::new("tools-guard", tools_guard)));
        if features.api {
            chain.push(Box::new(ApiRoutes));
        }
        if features.auth_routes {
            chain.push(Box::new(AuthRoutes::new(login_url.clone())));
        }
        if features.internal_tools {
            chain.push(Box::new(InternalToolsRoutes::new(tools_login_url)));
        }
        if features.client_app {
            chain.push(Box::new(ClientAppRoutes::new(login_url)));
        }

        Self { chain, resolver }
    }

    pub fn unit_names(&self) -> Vec<&'static str> {
        self.chain.iter().map(|unit| unit.name()).collect()
    }

    pub fn evaluate(&self, ctx: &RequestContext) -> Outcome {
        let mut exchange = Exchange::new(ctx, &self.resolver);

        for unit in &self.chain {
            if let Some(redirect) = unit.evaluate(&mut exchange) {
                tracing::debug!(
                    unit = unit.name(),
                    surface = ctx.surface().as_str(),
                    path = ctx.path(),
                    location = redirect.location(),
                    "redirect"
                );
                return Outcome::Redirect(redirect);
            }
        }

        exchange.finish()
    }
}
