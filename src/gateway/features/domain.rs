//! Domain redirector.
//!
//! Keeps each surface's pages on its own subdomain and sends surface roots to
//! the surface landing page.

use crate::gateway::Middleware;
use crate::gateway::config::DomainSettings;
use crate::gateway::context::RequestContext;
use crate::gateway::exchange::Exchange;
use crate::gateway::redirect::Redirect;
use crate::gateway::surface::Surface;

pub struct DomainRedirect {
    settings: DomainSettings,
}

impl DomainRedirect {
    pub fn new(settings: DomainSettings) -> Self {
        Self { settings }
    }

    /// Base domain shared by the surfaces, as seen from this request.
    fn base_domain<'a>(&'a self, ctx: &'a RequestContext) -> &'a str {
        if let Some(base) = self.settings.base_domain.as_deref() {
            return base;
        }
        let hostname = ctx.hostname();
        match ctx.surface().subdomain() {
            Some(label) => hostname
                .strip_prefix(label)
                .and_then(|rest| rest.strip_prefix('.'))
                .unwrap_or(hostname),
            None => hostname,
        }
    }

    /// Absolute URL of this request on the subdomain of `surface`, keeping path and query.
    ///
    /// `None` when there is no base domain to put the subdomain on (no Host).
    fn cross_surface(&self, ctx: &RequestContext, surface: Surface) -> Option<Redirect> {
        let label = surface.subdomain()?;
        let base = self.base_domain(ctx);
        if base.is_empty() {
            tracing::debug!(path = ctx.path(), "no base domain; cross-surface redirect skipped");
            return None;
        }

        let mut location = format!("{}://{}.{}", self.settings.scheme, label, base);
        if let Some(port) = ctx.port() {
            location.push_str(&format!(":{port}"));
        }
        location.push_str(ctx.path());
        if let Some(query) = ctx.query() {
            location.push('?');
            location.push_str(query);
        }
        Some(Redirect::to(location))
    }
}

impl Middleware for DomainRedirect {
    fn name(&self) -> &'static str {
        "domain-redirect"
    }

    fn evaluate(&self, exchange: &mut Exchange<'_>) -> Option<Redirect> {
        let ctx = exchange.ctx();
        let surface = ctx.surface();
        let owner = Surface::owning(ctx.path());

        if surface != Surface::Public && ctx.path() == "/" {
            let home = surface.home();
            exchange.normalize_to(home);
            return None;
        }

        match owner {
            Some(target) if target != surface => self.cross_surface(ctx, target),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::credential::tests::resolver;

    fn run(unit: &DomainRedirect, ctx: &RequestContext) -> (Option<String>, String) {
        let r = resolver();
        let mut exchange = Exchange::new(ctx, &r);
        let decision = unit.evaluate(&mut exchange).map(|r| r.location().to_string());
        (decision, exchange.path().to_string())
    }

    fn unit() -> DomainRedirect {
        DomainRedirect::new(DomainSettings::default())
    }

    #[test]
    fn app_root_normalizes_to_dashboard() {
        let ctx = RequestContext::new("app.elevalucro.com.br", "/");
        let (decision, path) = run(&unit(), &ctx);
        assert_eq!(decision, None);
        assert_eq!(path, "/elevalucro_bpo_app/dashboard");
    }

    #[test]
    fn tools_root_normalizes_to_prospects() {
        let ctx = RequestContext::new("tools.elevalucro.com.br", "/");
        let (decision, path) = run(&unit(), &ctx);
        assert_eq!(decision, None);
        assert_eq!(path, "/internal_tools/prospects");
    }

    #[test]
    fn tools_paths_leave_the_app_subdomain() {
        let ctx = RequestContext::new("app.elevalucro.com.br", "/internal_tools/prospects?page=2&q=a%20b");
        assert_eq!(
            run(&unit(), &ctx).0.as_deref(),
            Some("https://tools.elevalucro.com.br/internal_tools/prospects?page=2&q=a%20b")
        );
    }

    #[test]
    fn app_paths_leave_the_tools_subdomain() {
        let ctx = RequestContext::new("tools.elevalucro.com.br", "/elevalucro_bpo_app/dre?month=03");
        assert_eq!(
            run(&unit(), &ctx).0.as_deref(),
            Some("https://app.elevalucro.com.br/elevalucro_bpo_app/dre?month=03")
        );
    }

    #[test]
    fn public_host_prefixes_its_own_hostname() {
        let ctx = RequestContext::new("www.elevalucro.com.br", "/elevalucro_bpo_app/dashboard");
        assert_eq!(
            run(&unit(), &ctx).0.as_deref(),
            Some("https://app.www.elevalucro.com.br/elevalucro_bpo_app/dashboard")
        );

        let ctx = RequestContext::new("elevalucro.com.br", "/internal_tools");
        assert_eq!(
            run(&unit(), &ctx).0.as_deref(),
            Some("https://tools.elevalucro.com.br/internal_tools")
        );
    }

    #[test]
    fn public_host_forward_keeps_query() {
        let ctx = RequestContext::new("www.elevalucro.com.br", "/internal_tools/prospects?a=1&b=%20");
        assert_eq!(
            run(&unit(), &ctx).0.as_deref(),
            Some("https://tools.www.elevalucro.com.br/internal_tools/prospects?a=1&b=%20")
        );
    }

    #[test]
    fn missing_host_is_not_forwarded() {
        let ctx = RequestContext::new("", "/internal_tools/prospects?a=1");
        let (decision, path) = run(&unit(), &ctx);
        assert_eq!(decision, None);
        assert_eq!(path, "/internal_tools/prospects");

        let configured = DomainRedirect::new(DomainSettings {
            base_domain: Some("elevalucro.com.br".into()),
            scheme: "https".into(),
        });
        assert_eq!(
            run(&configured, &ctx).0.as_deref(),
            Some("https://tools.elevalucro.com.br/internal_tools/prospects?a=1")
        );
    }

    #[test]
    fn configured_base_domain_wins() {
        let unit = DomainRedirect::new(DomainSettings {
            base_domain: Some("elevalucro.com.br".into()),
            scheme: "https".into(),
        });
        let ctx = RequestContext::new("www.elevalucro.com.br", "/elevalucro_bpo_app/dashboard");
        assert_eq!(
            run(&unit, &ctx).0.as_deref(),
            Some("https://app.elevalucro.com.br/elevalucro_bpo_app/dashboard")
        );

        let ctx = RequestContext::new("www.elevalucro.com.br", "/internal_tools/prospects?a=1&b=%20");
        assert_eq!(
            run(&unit, &ctx).0.as_deref(),
            Some("https://tools.elevalucro.com.br/internal_tools/prospects?a=1&b=%20")
        );
    }

    #[test]
    fn ports_survive_cross_surface_redirects() {
        let unit = DomainRedirect::new(DomainSettings {
            base_domain: None,
            scheme: "http".into(),
        });
        let ctx = RequestContext::new("app.localhost:3000", "/internal_tools/routines");
        assert_eq!(
            run(&unit, &ctx).0.as_deref(),
            Some("http://tools.localhost:3000/internal_tools/routines")
        );
    }

    #[test]
    fn public_pages_continue() {
        for (host, path) in [
            ("www.elevalucro.com.br", "/"),
            ("www.elevalucro.com.br", "/pricing"),
            ("app.elevalucro.com.br", "/elevalucro_bpo_app/dashboard"),
            ("tools.elevalucro.com.br", "/internal_tools/prospects"),
            ("", "/elevalucro_bpo_appendix"),
        ] {
            let ctx = RequestContext::new(host, path);
            let (decision, working) = run(&unit(), &ctx);
            assert_eq!(decision, None, "{host}{path}");
            assert_eq!(working, path);
        }
    }
}
