//! CORS policy for browser callers of `/api`.
//!
//! Applied to the API router only; pages are same-origin.
//!
//! Policy:
//! - Any origin, WITHOUT credentials.
//! - Preflight (`OPTIONS`) is answered here, before the method router.

use axum::Router;
use axum::http::{Method, header};
use tower_http::cors::{Any, CorsLayer};

/// Apply the API CORS policy to the given Router.
///
/// Do not combine `Any` with `allow_credentials(true)`.
pub fn apply<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    router.layer(cors)
}
