use crate::domain::{
    models::user::{Role, User},
    ports::UserRepository,
    services::token_service::TokenService,
};
use crate::error::AppError;

/// Resolves the caller behind an access token. Any token failure and a
/// subject that no longer exists both surface as `Unauthenticated`.
pub async fn authenticate(tokens: &TokenService, users: &dyn UserRepository, access_token: &str) -> Result<User, AppError> {
    let claims = tokens.verify_access(access_token).map_err(|_| AppError::Unauthenticated)?;

    users.find_by_id(&claims.identity.user_id).await?
        .ok_or(AppError::Unauthenticated)
}

pub fn require_roles(user: &User, allowed: &[Role]) -> Result<(), AppError> {
    if allowed.contains(&user.role) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
