use crate::gateway::Middleware;
use crate::gateway::exchange::Exchange;
use crate::gateway::redirect::Redirect;
use crate::gateway::surface::{CLIENT_APP_HOME, CLIENT_APP_PREFIX};

/// `/elevalucro_bpo_app/*`
pub struct ClientAppRoutes {
    login_url: String,
}

impl ClientAppRoutes {
    pub fn new(login_url: impl Into<String>) -> Self {
        Self {
            login_url: login_url.into(),
        }
    }
}

impl Middleware for ClientAppRoutes {
    fn name(&self) -> &'static str {
        "client-app"
    }

    fn evaluate(&self, exchange: &mut Exchange<'_>) -> Option<Redirect> {
        super::gate_section(exchange, CLIENT_APP_PREFIX, CLIENT_APP_HOME, &self.login_url)
    }
}
