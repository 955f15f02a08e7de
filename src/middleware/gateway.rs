//! Gateway を axum の middleware として適用する。
//!
//! - Request から RequestContext を作り、Gateway の chain を一度だけ評価する
//! - redirect なら 302 + Location を返して handler は呼ばない
//! - pass-through なら AuthContext / ClientId を extensions に入れて次へ
//!   (middleware → extractor への受け渡し)

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderValue, Request, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::gateway::context::RequestContext;
use crate::gateway::redirect::Redirect;
use crate::gateway::{Outcome, Passthrough};
use crate::state::AppState;

/// Router 全体 (page / API / static fallback) の前段に gateway を掛ける。
///
/// 例：
/// ```ignore
/// let router = Router::new().nest("/api", api::routes()).with_state(state.clone());
/// let router = middleware::gateway::apply(router, state);
/// ```
pub fn apply(router: Router, state: AppState) -> Router {
    router.layer(middleware::from_fn_with_state(state, gateway_middleware))
}

async fn gateway_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let ctx = RequestContext::from_http(req.headers(), req.uri());

    let pass = match state.gateway.evaluate(&ctx) {
        Outcome::Redirect(redirect) => return redirect_response(&redirect),
        Outcome::Pass(pass) => pass,
    };

    let Passthrough { session, client_id } = pass;

    if let Some(session) = session {
        req.extensions_mut().insert(session);
    }
    if let Some(client_id) = client_id {
        req.extensions_mut().insert(client_id);
    }

    Ok(next.run(req).await)
}

fn redirect_response(redirect: &Redirect) -> Result<Response, AppError> {
    let location = HeaderValue::from_str(redirect.location()).map_err(|err| {
        tracing::error!(error = %err, "redirect target is not a valid header value");
        AppError::Internal
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
