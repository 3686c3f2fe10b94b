use crate::config::Config;
use crate::domain::models::auth::{Claims, TokenIdentity, TokenKind, TokenPair};
use crate::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, error};

/// Issues and verifies the HMAC-signed access/refresh tokens.
///
/// Both kinds share one secret and algorithm. They differ only in the `type`
/// claim, which every verification checks against the kind it expects.
pub struct TokenService {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(config: &Config) -> Self {
        Self {
            algorithm: config.jwt_algorithm,
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl: Duration::minutes(config.access_token_expire_minutes),
            refresh_ttl: Duration::days(config.refresh_token_expire_days),
        }
    }

    pub fn issue_access_token(&self, identity: &TokenIdentity, ttl: Option<Duration>) -> Result<String, AppError> {
        self.issue(identity, TokenKind::Access, ttl.unwrap_or(self.access_ttl))
    }

    pub fn issue_refresh_token(&self, identity: &TokenIdentity, ttl: Option<Duration>) -> Result<String, AppError> {
        self.issue(identity, TokenKind::Refresh, ttl.unwrap_or(self.refresh_ttl))
    }

    pub fn issue_pair(&self, identity: &TokenIdentity) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.issue_access_token(identity, None)?,
            refresh_token: self.issue_refresh_token(identity, None)?,
            token_type: "bearer",
        })
    }

    pub fn verify_access(&self, token: &str) -> Result<Claims, AppError> {
        self.verify(token, TokenKind::Access)
    }

    pub fn verify_refresh(&self, token: &str) -> Result<Claims, AppError> {
        self.verify(token, TokenKind::Refresh)
    }

    /// Decodes `token` and accepts it only when its `type` marker is exactly
    /// `expected`. Any decode failure, expiry or marker mismatch is `InvalidToken`.
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, AppError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            debug!("Token rejected: {}", e);
            AppError::InvalidToken
        })?;

        match data.claims.kind {
            Some(kind) if kind == expected => Ok(data.claims),
            other => {
                debug!("Token type mismatch: expected {:?}, got {:?}", expected, other);
                Err(AppError::InvalidToken)
            }
        }
    }

    fn issue(&self, identity: &TokenIdentity, kind: TokenKind, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            identity: identity.clone(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            kind: Some(kind),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key).map_err(|e| {
            error!("JWT encoding failed: {}", e);
            AppError::Internal
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::user::Role;

    fn config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            port: 0,
            jwt_secret: "unit-test-secret".to_string(),
            jwt_algorithm: Algorithm::HS256,
            access_token_expire_minutes: 60,
            refresh_token_expire_days: 7,
            ai_latency_ms: 0,
        }
    }

    fn identity() -> TokenIdentity {
        TokenIdentity {
            user_id: "u-1".to_string(),
            email: "a@x.com".to_string(),
            role: Role::CompanyAdmin,
            company_id: "c-1".to_string(),
        }
    }

    #[test]
    fn access_token_round_trips_identity() {
        let service = TokenService::new(&config());
        let token = service.issue_access_token(&identity(), None).unwrap();
        let claims = service.verify_access(&token).unwrap();

        assert_eq!(claims.identity, identity());
        assert_eq!(claims.kind, Some(TokenKind::Access));
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_is_rejected() {
        let service = TokenService::new(&config());
        let token = service.issue_access_token(&identity(), Some(Duration::seconds(-5))).unwrap();
        assert!(matches!(service.verify_access(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn kinds_are_not_interchangeable() {
        let service = TokenService::new(&config());
        let pair = service.issue_pair(&identity()).unwrap();

        assert_ne!(pair.access_token, pair.refresh_token);
        assert!(matches!(service.verify_access(&pair.refresh_token), Err(AppError::InvalidToken)));
        assert!(matches!(service.verify_refresh(&pair.access_token), Err(AppError::InvalidToken)));
        assert!(service.verify_refresh(&pair.refresh_token).is_ok());
    }

    #[test]
    fn token_without_type_marker_is_rejected() {
        let service = TokenService::new(&config());
        let now = Utc::now();
        let claims = Claims {
            identity: identity(),
            exp: (now + Duration::minutes(5)).timestamp(),
            iat: now.timestamp(),
            kind: None,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"unit-test-secret"),
        )
        .unwrap();

        assert!(matches!(service.verify_access(&token), Err(AppError::InvalidToken)));
        assert!(matches!(service.verify_refresh(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn foreign_signature_is_rejected() {
        let service = TokenService::new(&config());
        let mut other = config();
        other.jwt_secret = "someone-else".to_string();
        let forged = TokenService::new(&other).issue_access_token(&identity(), None).unwrap();

        assert!(matches!(service.verify_access(&forged), Err(AppError::InvalidToken)));
        assert!(matches!(service.verify_access("not.a.jwt"), Err(AppError::InvalidToken)));
    }
}
