/*
 * Responsibility
 * - 1 リクエスト分の入力 (host / path / query / cookies) をまとめた読み取り専用の値
 * - surface の判定はここで一度だけ行う
 */
use std::collections::HashMap;

use axum::http::{HeaderMap, Uri, header, uri::Authority};

use super::surface::Surface;

#[derive(Debug, Clone)]
pub struct RequestContext {
    hostname: String,
    port: Option<u16>,
    path: String,
    query: Option<String>,
    cookies: HashMap<String, String>,
    forwarded_for: Option<String>,
    user_agent: Option<String>,
    surface: Surface,
}

impl RequestContext {
    /// `host` is a Host header value (port allowed), `target` a path with optional query.
    pub fn new(host: &str, target: &str) -> Self {
        let (hostname, port) = split_host(host);
        let (path, query) = match target.split_once('?') {
            Some((p, q)) => (p, Some(q.to_string())),
            None => (target, None),
        };
        let path = if path.is_empty() { "/" } else { path };

        Self {
            surface: Surface::classify(&hostname),
            hostname,
            port,
            path: path.to_string(),
            query: query.filter(|q| !q.is_empty()),
            cookies: HashMap::new(),
            forwarded_for: None,
            user_agent: None,
        }
    }

    pub fn from_http(headers: &HeaderMap, uri: &Uri) -> Self {
        let host = headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .or_else(|| uri.authority().map(|a| a.to_string()))
            .unwrap_or_default();

        let target = uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| uri.path());

        let mut ctx = Self::new(&host, target);

        for value in headers.get_all(header::COOKIE) {
            if let Ok(raw) = value.to_str() {
                ctx.absorb_cookie_header(raw);
            }
        }

        ctx.forwarded_for = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        ctx.user_agent = headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        ctx
    }

    pub fn with_cookie(mut self, name: &str, value: &str) -> Self {
        self.cookies
            .entry(name.to_string())
            .or_insert_with(|| value.to_string());
        self
    }

    pub fn with_forwarded_for(mut self, value: &str) -> Self {
        self.forwarded_for = Some(value.to_string());
        self
    }

    pub fn with_user_agent(mut self, value: &str) -> Self {
        self.user_agent = Some(value.to_string());
        self
    }

    fn absorb_cookie_header(&mut self, raw: &str) {
        for pair in raw.split(';') {
            let pair = pair.trim();
            if let Some((name, value)) = pair.split_once('=') {
                let name = name.trim();
                if !name.is_empty() {
                    // First occurrence wins, like browsers order them.
                    self.cookies
                        .entry(name.to_string())
                        .or_insert_with(|| value.trim().to_string());
                }
            }
        }
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn forwarded_for(&self) -> Option<&str> {
        self.forwarded_for.as_deref()
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }
}

fn split_host(host: &str) -> (String, Option<u16>) {
    match host.trim().parse::<Authority>() {
        Ok(authority) => (authority.host().to_string(), authority.port_u16()),
        Err(_) => (String::new(), None),
    }
}
