//! Hostname -> surface classification.
//!
//! Every unit in the chain reads the classification computed here once per
//! request; none of them look at the hostname prefix on their own.

pub const CLIENT_APP_PREFIX: &str = "/elevalucro_bpo_app";
pub const CLIENT_APP_HOME: &str = "/elevalucro_bpo_app/dashboard";
pub const INTERNAL_TOOLS_PREFIX: &str = "/internal_tools";
pub const INTERNAL_TOOLS_HOME: &str = "/internal_tools/prospects";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    Public,
    ClientApp,
    InternalTools,
}

impl Surface {
    /// Case-sensitive prefix match; first match wins.
    pub fn classify(hostname: &str) -> Self {
        if hostname.starts_with("app.") {
            Surface::ClientApp
        } else if hostname.starts_with("tools.") {
            Surface::InternalTools
        } else {
            Surface::Public
        }
    }

    /// Subdomain label the surface is served from.
    pub fn subdomain(&self) -> Option<&'static str> {
        match self {
            Surface::Public => None,
            Surface::ClientApp => Some("app"),
            Surface::InternalTools => Some("tools"),
        }
    }

    /// Path prefix owned by the surface.
    pub fn path_prefix(&self) -> Option<&'static str> {
        match self {
            Surface::Public => None,
            Surface::ClientApp => Some(CLIENT_APP_PREFIX),
            Surface::InternalTools => Some(INTERNAL_TOOLS_PREFIX),
        }
    }

    /// Landing page of the surface.
    pub fn home(&self) -> &'static str {
        match self {
            Surface::InternalTools => INTERNAL_TOOLS_HOME,
            Surface::Public | Surface::ClientApp => CLIENT_APP_HOME,
        }
    }

    /// Surface that owns `path`, if any.
    pub fn owning(path: &str) -> Option<Self> {
        [Surface::ClientApp, Surface::InternalTools]
            .into_iter()
            .find(|s| s.path_prefix().is_some_and(|p| path_is_under(path, p)))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Surface::Public => "public",
            Surface::ClientApp => "client_app",
            Surface::InternalTools => "internal_tools",
        }
    }
}

/// Segment-aware prefix test: `/auth` covers `/auth` and `/auth/login`, not `/authz`.
pub fn path_is_under(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// `prefix` itself or `prefix/`.
pub fn is_prefix_root(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest == "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_hostname_prefix() {
        assert_eq!(Surface::classify("app.elevalucro.com.br"), Surface::ClientApp);
        assert_eq!(
            Surface::classify("tools.elevalucro.com.br"),
            Surface::InternalTools
        );
        assert_eq!(Surface::classify("www.elevalucro.com.br"), Surface::Public);
        assert_eq!(Surface::classify("elevalucro.com.br"), Surface::Public);
        assert_eq!(Surface::classify(""), Surface::Public);
    }

    #[test]
    fn classification_is_case_sensitive() {
        assert_eq!(Surface::classify("APP.elevalucro.com.br"), Surface::Public);
        assert_eq!(Surface::classify("application.com"), Surface::Public);
    }

    #[test]
    fn path_prefix_matching_respects_segments() {
        assert!(path_is_under("/auth", "/auth"));
        assert!(path_is_under("/auth/login", "/auth"));
        assert!(path_is_under("/auth/login", "/auth/"));
        assert!(!path_is_under("/authz", "/auth"));
        assert!(!path_is_under("/", "/auth"));
        assert!(path_is_under("/anything", "/"));
    }

    #[test]
    fn prefix_root_detection() {
        assert!(is_prefix_root("/internal_tools", INTERNAL_TOOLS_PREFIX));
        assert!(is_prefix_root("/internal_tools/", INTERNAL_TOOLS_PREFIX));
        assert!(!is_prefix_root("/internal_tools/prospects", INTERNAL_TOOLS_PREFIX));
    }

    #[test]
    fn owning_surface_of_path() {
        assert_eq!(Surface::owning(CLIENT_APP_HOME), Some(Surface::ClientApp));
        assert_eq!(
            Surface::owning("/internal_tools/routines"),
            Some(Surface::InternalTools)
        );
        assert_eq!(Surface::owning("/pricing"), None);
    }
}
