//! Path-scoped units. Each one is a no-op outside its own prefix.

pub mod api;
pub mod auth_routes;
pub mod client_app;
pub mod domain;
pub mod internal_tools;

use super::exchange::Exchange;
use super::redirect::Redirect;
use super::surface::{is_prefix_root, path_is_under};

/// Shared rule of the app and tools sections: a session is required, and the
/// bare prefix lands on the section home (query kept).
///
/// The session is the one resolved for the whole request; the raw cookie is
/// never consulted again here.
fn gate_section(
    exchange: &Exchange<'_>,
    prefix: &str,
    home: &str,
    login_url: &str,
) -> Option<Redirect> {
    let path = exchange.path();
    if !path_is_under(path, prefix) {
        return None;
    }

    if exchange.session().is_none() {
        return Some(Redirect::with_return_to(login_url, path));
    }

    if is_prefix_root(path, prefix) {
        return Some(Redirect::with_query(home, exchange.ctx().query()));
    }

    None
}
