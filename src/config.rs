use std::env;
use std::str::FromStr;

use jsonwebtoken::Algorithm;

const MAX_ACCESS_TOKEN_MINUTES: i64 = 60 * 24 * 365;
const MAX_REFRESH_TOKEN_DAYS: i64 = 3650;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_algorithm: Algorithm,
    pub access_token_expire_minutes: i64,
    pub refresh_token_expire_days: i64,
    pub ai_latency_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_algorithm = env::var("JWT_ALGORITHM").unwrap_or_else(|_| "HS256".to_string());

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://saas_platform.db?mode=rwc".to_string()),
            port: env::var("PORT").unwrap_or_else(|_| "8000".to_string()).parse().expect("PORT must be a number"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            jwt_algorithm: parse_hmac_algorithm(&jwt_algorithm).expect("JWT_ALGORITHM must be one of HS256, HS384, HS512"),
            access_token_expire_minutes: parse_ttl(&env::var("ACCESS_TOKEN_EXPIRE_MINUTES").unwrap_or_else(|_| "60".to_string()), MAX_ACCESS_TOKEN_MINUTES)
                .expect("ACCESS_TOKEN_EXPIRE_MINUTES must be a whole number between 1 and 525600"),
            refresh_token_expire_days: parse_ttl(&env::var("REFRESH_TOKEN_EXPIRE_DAYS").unwrap_or_else(|_| "7".to_string()), MAX_REFRESH_TOKEN_DAYS)
                .expect("REFRESH_TOKEN_EXPIRE_DAYS must be a whole number between 1 and 3650"),
            ai_latency_ms: env::var("AI_LATENCY_MS").unwrap_or_else(|_| "2000".to_string()).parse().expect("AI_LATENCY_MS must be a number"),
        }
    }
}

/// Token lifetimes must be positive and bounded so the expiry arithmetic
/// cannot overflow.
fn parse_ttl(raw: &str, max: i64) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|ttl| (1..=max).contains(ttl))
}

/// The signing key is a shared secret, so only the HMAC family is usable.
pub fn parse_hmac_algorithm(name: &str) -> Option<Algorithm> {
    match Algorithm::from_str(name).ok()? {
        alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) => Some(alg),
        _ => None,
    }
}
