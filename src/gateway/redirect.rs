use url::form_urlencoded;

/// The only decision a unit can make besides "continue".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    location: String,
}

impl Redirect {
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }

    /// `target?redirect=<return_to>` (or `&redirect=` when `target` already has a query).
    pub fn with_return_to(target: &str, return_to: &str) -> Self {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .append_pair("redirect", return_to)
            .finish();
        let sep = if target.contains('?') { '&' } else { '?' };
        Self::to(format!("{target}{sep}{encoded}"))
    }

    /// `path` carrying the request's query string unchanged.
    pub fn with_query(path: &str, query: Option<&str>) -> Self {
        match query {
            Some(query) if !query.is_empty() => Self::to(format!("{path}?{query}")),
            _ => Self::to(path),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}
