use crate::gateway::Middleware;
use crate::gateway::exchange::Exchange;
use crate::gateway::redirect::Redirect;
use crate::gateway::surface::is_prefix_root;

const AUTH_PREFIX: &str = "/auth";

/// `/auth/*`: bare prefix goes to the login page, and a signed-in visitor is
/// bounced off the login page to the landing page of the surface they are on.
pub struct AuthRoutes {
    login_url: String,
}

impl AuthRoutes {
    pub fn new(login_url: impl Into<String>) -> Self {
        Self {
            login_url: login_url.into(),
        }
    }
}

impl Middleware for AuthRoutes {
    fn name(&self) -> &'static str {
        "auth-routes"
    }

    fn evaluate(&self, exchange: &mut Exchange<'_>) -> Option<Redirect> {
        let path = exchange.path();

        if is_prefix_root(path, AUTH_PREFIX) {
            return Some(Redirect::to(&self.login_url));
        }

        let on_login = path.trim_end_matches('/') == self.login_url.trim_end_matches('/');
        if on_login && exchange.session().is_some() {
            return Some(Redirect::to(exchange.surface().home()));
        }

        None
    }
}
