use std::{fs, path::PathBuf};

use clap::Parser;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use uuid::Uuid;

/// Mint an access credential for local testing of the gateway.
///
/// The token mirrors what the hosted auth provider issues:
/// - `sub` (UUID), `aud`, `iat`, `exp`
/// - `app_metadata.role` holding the role id the gateway maps to a surface role
///
/// Signed with HS256 (shared secret) or EdDSA (Ed25519 PKCS#8 PEM).
/// Put the output in the `sb-access-token` cookie.
#[derive(Parser, Debug)]
#[command(name = "token-gen", version, about)]
struct Args {
    /// Role id placed in app_metadata.role (e.g. "2" in development)
    #[arg(long)]
    role_id: String,

    /// HS256 secret. Falls back to AUTH_JWT_SECRET. Ignored when --private-pem is given.
    #[arg(long, env = "AUTH_JWT_SECRET", hide_env_values = true)]
    secret: Option<String>,

    /// Path to an Ed25519 private key in PEM (PKCS#8) for EdDSA signing
    #[arg(long, value_name = "FILE")]
    private_pem: Option<PathBuf>,

    /// Audience claim
    #[arg(long, default_value = "authenticated")]
    audience: String,

    /// Issuer claim (omitted when not given)
    #[arg(long)]
    issuer: Option<String>,

    /// Lifetime in seconds. Negative values mint an already expired token.
    #[arg(long, default_value_t = 3600, allow_negative_numbers = true)]
    ttl: i64,

    /// Override sub. Default: random UUID v4.
    #[arg(long)]
    sub: Option<String>,

    /// Print only the token (no extra lines)
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let (key, algorithm) = match (&args.secret, &args.private_pem) {
        (_, Some(path)) => {
            let pem = fs::read_to_string(path)?;
            (EncodingKey::from_ed_pem(pem.as_bytes())?, Algorithm::EdDSA)
        }
        (Some(secret), None) => (EncodingKey::from_secret(secret.as_bytes()), Algorithm::HS256),
        (None, None) => return Err("either --secret (or AUTH_JWT_SECRET) or --private-pem is required".into()),
    };

    let iat = chrono::Utc::now().timestamp();
    let exp = iat + args.ttl;
    let sub = args.sub.unwrap_or_else(|| Uuid::new_v4().to_string());

    // Integer-looking ids stay numbers, like the development auth stack emits them.
    let role = match args.role_id.parse::<u64>() {
        Ok(n) => serde_json::Value::from(n),
        Err(_) => serde_json::Value::from(args.role_id.clone()),
    };

    let mut claims = serde_json::json!({
        "sub": sub,
        "aud": args.audience,
        "iat": iat,
        "exp": exp,
        "role": "authenticated",
        "app_metadata": { "role": role },
    });
    if let (Some(iss), Some(map)) = (args.issuer, claims.as_object_mut()) {
        map.insert("iss".to_string(), serde_json::Value::String(iss));
    }

    let mut header = Header::new(algorithm);
    header.typ = Some("JWT".to_string());
    let token = jsonwebtoken::encode(&header, &claims, &key)?;

    if args.quiet {
        println!("{}", token);
        return Ok(());
    }

    println!("token: {}", token);
    println!("sub: {}", sub);
    println!("role_id: {}", args.role_id);
    println!("exp: {}", exp);
    println!("cookie: sb-access-token={}", token);

    Ok(())
}
