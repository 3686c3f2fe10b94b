use std::sync::Arc;
use crate::domain::{
    models::{
        activity::{ActivityLog, AuditAction},
        auth::{TokenIdentity, TokenPair},
        scope::CompanyScope,
        user::User,
    },
    ports::{ActivityRepository, UserRepository},
    services::{password, token_service::TokenService},
};
use crate::error::AppError;
use tracing::info;

/// Signup, login and refresh: the operations that run before a caller has an
/// access token.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    activities: Arc<dyn ActivityRepository>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, activities: Arc<dyn ActivityRepository>, tokens: Arc<TokenService>) -> Self {
        Self { users, activities, tokens }
    }

    pub async fn signup(&self, company_name: &str, email: &str, password: &str) -> Result<User, AppError> {
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AppError::EmailTaken);
        }

        let password_hash = password::hash_password(password)?;
        let user = self.users.signup(company_name, email, &password_hash).await?;

        info!("User {} signed up into company {} as {}", user.id, user.company_id, user.role);
        Ok(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AppError> {
        let user = self.users.find_by_email(email).await?
            .ok_or(AppError::InvalidCredentials)?;

        if !password::verify_password(password, &user.password_hash) {
            return Err(AppError::InvalidCredentials);
        }

        let pair = self.tokens.issue_pair(&TokenIdentity::from(&user))?;

        let scope = CompanyScope::of(&user);
        let log = ActivityLog::new(&scope, &user.id, AuditAction::UserLogin, format!("User {} logged in", user.email));
        self.activities.append(&log).await?;

        info!("User logged in: {}", user.id);
        Ok(pair)
    }

    /// Exchanges a refresh token for a new pair. The identity is rebuilt from
    /// the stored user so role changes take effect on refresh.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self.tokens.verify_refresh(refresh_token)?;

        let user = self.users.find_by_id(&claims.identity.user_id).await?
            .ok_or(AppError::UserNotFound)?;

        let pair = self.tokens.issue_pair(&TokenIdentity::from(&user))?;
        info!("Token refreshed for user: {}", user.id);
        Ok(pair)
    }
}
