use crate::gateway::Middleware;
use crate::gateway::exchange::Exchange;
use crate::gateway::redirect::Redirect;
use crate::gateway::surface::{INTERNAL_TOOLS_HOME, INTERNAL_TOOLS_PREFIX};

/// `/internal_tools/*`
pub struct InternalToolsRoutes {
    login_url: String,
}

impl InternalToolsRoutes {
    pub fn new(login_url: impl Into<String>) -> Self {
        Self {
            login_url: login_url.into(),
        }
    }
}

impl Middleware for InternalToolsRoutes {
    fn name(&self) -> &'static str {
        "internal-tools"
    }

    fn evaluate(&self, exchange: &mut Exchange<'_>) -> Option<Redirect> {
        super::gate_section(
            exchange,
            INTERNAL_TOOLS_PREFIX,
            INTERNAL_TOOLS_HOME,
            &self.login_url,
        )
    }
}
