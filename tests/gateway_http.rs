#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end behaviour of the gateway in front of the real router.
//!
//! Requests go through `app::build_router` exactly as in production:
//! HTTP layers -> gateway -> `/api` routes or the static fallback.

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use elevalucro_gateway::{app, config::Config};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};
use tower::ServiceExt;

const SECRET: &str = "integration-secret";
const BPO_ROLE_ID: &str = "3e979a41-1ddb-452a-a6f8-7053b894856c";
const CLIENT_ROLE_ID: &str = "b1f0c9a2-5d4e-4c3b-9a8f-7e6d5c4b3a21";

fn router_with(extra: &[(&str, &str)]) -> Router {
    let mut env: Vec<(String, String)> = vec![
        ("APP_ENV".into(), "production".into()),
        ("AUTH_JWT_SECRET".into(), SECRET.into()),
        ("STATIC_DIR".into(), "./__no_static_site__".into()),
        ("ROLE_MAP".into(), format!("{CLIENT_ROLE_ID}=client_side")),
    ];
    env.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));

    let config = Config::from_lookup(|key| {
        env.iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
    .unwrap();
    let state = app::build_state(&config).unwrap();
    app::build_router(state, &config)
}

fn router() -> Router {
    router_with(&[])
}

fn credential(role_id: &str) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &json!({
            "sub": "5f2b7c1d-3e4a-4b5c-8d9e-0a1b2c3d4e5f",
            "aud": "authenticated",
            "exp": chrono::Utc::now().timestamp() + 900,
            "app_metadata": { "role": role_id },
        }),
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

fn request(host: &str, target: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(target).header(header::HOST, host);
    if let Some(token) = token {
        builder = builder.header(
            header::COOKIE,
            format!("sb-refresh-token=r1; sb-access-token={token}"),
        );
    }
    builder.body(Body::empty()).unwrap()
}

async fn send(router: Router, req: Request<Body>) -> Response {
    router.oneshot(req).await.unwrap()
}

fn location(res: &Response) -> &str {
    assert_eq!(res.status(), StatusCode::FOUND, "expected a redirect");
    res.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("location header")
}

async fn json_body(res: Response) -> Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn anonymous_app_root_is_sent_to_login() {
    let res = send(router(), request("app.elevalucro.com.br", "/", None)).await;
    assert_eq!(
        location(&res),
        "/auth/login?redirect=%2Felevalucro_bpo_app%2Fdashboard"
    );
}

#[tokio::test]
async fn client_role_is_denied_on_tools() {
    let token = credential(CLIENT_ROLE_ID);
    let res = send(
        router(),
        request("tools.elevalucro.com.br", "/internal_tools/prospects", Some(&token)),
    )
    .await;
    assert_eq!(location(&res), "/auth/access-denied");
}

#[tokio::test]
async fn bpo_role_is_denied_on_app() {
    let token = credential(BPO_ROLE_ID);
    let res = send(
        router(),
        request("app.elevalucro.com.br", "/elevalucro_bpo_app/dashboard", Some(&token)),
    )
    .await;
    assert_eq!(location(&res), "/auth/access-denied");
}

#[tokio::test]
async fn public_host_forwards_app_paths() {
    let res = send(
        router(),
        request("www.elevalucro.com.br", "/elevalucro_bpo_app/dashboard", None),
    )
    .await;
    assert_eq!(
        location(&res),
        "https://app.www.elevalucro.com.br/elevalucro_bpo_app/dashboard"
    );

    let res = send(
        router_with(&[("GATEWAY_BASE_DOMAIN", "elevalucro.com.br")]),
        request("www.elevalucro.com.br", "/elevalucro_bpo_app/dashboard", None),
    )
    .await;
    assert_eq!(
        location(&res),
        "https://app.elevalucro.com.br/elevalucro_bpo_app/dashboard"
    );
}

#[tokio::test]
async fn public_host_forward_keeps_query_verbatim() {
    let res = send(
        router(),
        request("www.elevalucro.com.br", "/internal_tools/prospects?a=1&b=%20", None),
    )
    .await;
    assert_eq!(
        location(&res),
        "https://tools.www.elevalucro.com.br/internal_tools/prospects?a=1&b=%20"
    );

    let res = send(
        router_with(&[("GATEWAY_BASE_DOMAIN", "elevalucro.com.br")]),
        request("elevalucro.com.br", "/elevalucro_bpo_app/dre?month=03&view=a%2Bb", None),
    )
    .await;
    assert_eq!(
        location(&res),
        "https://app.elevalucro.com.br/elevalucro_bpo_app/dre?month=03&view=a%2Bb"
    );
}

#[tokio::test]
async fn signed_in_client_skips_login_page() {
    let token = credential(CLIENT_ROLE_ID);
    let res = send(
        router(),
        request("app.elevalucro.com.br", "/auth/login", Some(&token)),
    )
    .await;
    assert_eq!(location(&res), "/elevalucro_bpo_app/dashboard");
}

#[tokio::test]
async fn cross_surface_redirect_keeps_query_verbatim() {
    let res = send(
        router(),
        request(
            "tools.elevalucro.com.br",
            "/elevalucro_bpo_app/transactions?from=2024-01-01&tag=a%2Bb",
            None,
        ),
    )
    .await;
    assert_eq!(
        location(&res),
        "https://app.elevalucro.com.br/elevalucro_bpo_app/transactions?from=2024-01-01&tag=a%2Bb"
    );
}

#[tokio::test]
async fn forged_role_claim_fails_closed() {
    let token = credential(CLIENT_ROLE_ID);
    let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
    parts[1] = URL_SAFE_NO_PAD.encode(
        json!({
            "exp": chrono::Utc::now().timestamp() + 900,
            "app_metadata": { "role": BPO_ROLE_ID },
        })
        .to_string(),
    );
    let forged = parts.join(".");

    let res = send(
        router(),
        request("tools.elevalucro.com.br", "/internal_tools/prospects", Some(&forged)),
    )
    .await;
    assert_eq!(
        location(&res),
        "/auth/login?redirect=%2Finternal_tools%2Fprospects"
    );
}

#[tokio::test]
async fn authorized_page_passes_through_to_static_site() {
    let token = credential(BPO_ROLE_ID);
    let res = send(
        router(),
        request("tools.elevalucro.com.br", "/internal_tools/prospects", Some(&token)),
    )
    .await;
    // No static site on disk in tests: reaching the fallback proves the gateway let it through.
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.headers().get(header::LOCATION).is_none());
    assert!(res.headers().get("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn health_is_public_and_decorated() {
    let res = send(
        router(),
        request("app.elevalucro.com.br", "/api/health", None),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let headers = res.headers();
    assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(headers.get("x-xss-protection").unwrap(), "1; mode=block");
    assert!(headers.get("x-request-id").is_some());

    assert_eq!(json_body(res).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn session_endpoint_reports_verified_role() {
    let token = credential(CLIENT_ROLE_ID);
    let res = send(
        router(),
        request("app.elevalucro.com.br", "/api/v1/session", Some(&token)),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = json_body(res).await;
    assert_eq!(body["role"], "client_side");
    assert_eq!(body["user_id"], "5f2b7c1d-3e4a-4b5c-8d9e-0a1b2c3d4e5f");
}

#[tokio::test]
async fn session_endpoint_without_credential_is_unauthorized() {
    let res = send(
        router(),
        request("www.elevalucro.com.br", "/api/v1/session", None),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(res).await["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn guarded_api_requires_login_on_app_surface() {
    let res = send(
        router(),
        request("app.elevalucro.com.br", "/api/v1/session", None),
    )
    .await;
    assert_eq!(location(&res), "/auth/login?redirect=%2Fapi%2Fv1%2Fsession");
}

#[tokio::test]
async fn unknown_api_route_is_json_not_found() {
    let res = send(
        router(),
        request("www.elevalucro.com.br", "/api/nope", None),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(res).await["error"]["code"], "not_found");
}

#[tokio::test]
async fn missing_host_header_is_public() {
    let req = Request::builder()
        .uri("/internal_tools/prospects")
        .body(Body::empty())
        .unwrap();
    let res = send(router(), req).await;
    // No host to build a subdomain from: the section itself asks for a session.
    assert_eq!(
        location(&res),
        "/auth/login?redirect=%2Finternal_tools%2Fprospects"
    );
}

#[tokio::test]
async fn api_preflight_is_answered_without_a_session() {
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/session")
        .header(header::HOST, "www.elevalucro.com.br")
        .header(header::ORIGIN, "https://partner.example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization")
        .body(Body::empty())
        .unwrap();
    let res = send(router(), req).await;

    assert!(res.status().is_success(), "status {}", res.status());
    let headers = res.headers();
    assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");

    let methods = headers
        .get("access-control-allow-methods")
        .and_then(|v| v.to_str().ok())
        .unwrap();
    for method in ["GET", "POST", "PUT", "DELETE", "OPTIONS"] {
        assert!(methods.contains(method), "{method} missing from {methods}");
    }

    let allowed = headers
        .get("access-control-allow-headers")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_ascii_lowercase();
    assert!(allowed.contains("content-type"), "{allowed}");
    assert!(allowed.contains("authorization"), "{allowed}");
}

#[tokio::test]
async fn public_routes_are_configurable() {
    let router = router_with(&[("GATEWAY_APP_PUBLIC_ROUTES", "/auth,/elevalucro_bpo_app/onboarding")]);
    let res = send(
        router,
        request("app.elevalucro.com.br", "/elevalucro_bpo_app/onboarding", None),
    )
    .await;
    // Guard lets it through; the client-app section still wants a session.
    assert_eq!(
        location(&res),
        "/auth/login?redirect=%2Felevalucro_bpo_app%2Fonboarding"
    );
}
