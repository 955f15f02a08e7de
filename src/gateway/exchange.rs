use std::cell::OnceCell;

use super::context::RequestContext;
use super::features::api::ClientId;
use super::redirect::Redirect;
use super::session::{AuthContext, Authentication};
use super::surface::Surface;
use super::{Outcome, Passthrough};
use crate::services::auth::RoleResolver;

/// Per-request working state threaded through the chain.
///
/// The [`RequestContext`] stays read-only; units record their side effects
/// (path normalization, client id) here.
pub struct Exchange<'a> {
    ctx: &'a RequestContext,
    resolver: &'a RoleResolver,
    auth: OnceCell<Authentication>,
    normalized: Option<String>,
    client_id: Option<ClientId>,
}

impl<'a> Exchange<'a> {
    pub fn new(ctx: &'a RequestContext, resolver: &'a RoleResolver) -> Self {
        Self {
            ctx,
            resolver,
            auth: OnceCell::new(),
            normalized: None,
            client_id: None,
        }
    }

    pub fn ctx(&self) -> &'a RequestContext {
        self.ctx
    }

    pub fn surface(&self) -> Surface {
        self.ctx.surface()
    }

    /// Path the remaining units should reason about.
    pub fn path(&self) -> &str {
        self.normalized.as_deref().unwrap_or_else(|| self.ctx.path())
    }

    /// Same-origin rewrite of the working path.
    ///
    /// Emitted as a redirect once the chain finishes without another decision.
    pub fn normalize_to(&mut self, path: &str) {
        self.normalized = Some(path.to_string());
    }

    pub fn authentication(&self) -> &Authentication {
        self.auth
            .get_or_init(|| Authentication::resolve(self.ctx, self.resolver))
    }

    pub fn session(&self) -> Option<&AuthContext> {
        self.authentication().session()
    }

    pub fn set_client_id(&mut self, id: ClientId) {
        self.client_id = Some(id);
    }

    pub(super) fn finish(mut self) -> Outcome {
        if let Some(path) = self.normalized.take() {
            return Outcome::Redirect(Redirect::to(path));
        }

        let session = self.session().cloned();
        Outcome::Pass(Passthrough {
            session,
            client_id: self.client_id,
        })
    }
}
