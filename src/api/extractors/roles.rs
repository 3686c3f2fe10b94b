use axum::{extract::FromRequestParts, http::request::Parts};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::user::{Role, User};
use crate::domain::services::authorization::require_roles;
use crate::error::AppError;
use crate::state::AppState;
use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::Arc;
use tracing::warn;

/// The set of roles an endpoint admits.
pub trait RolePolicy: Send + Sync + 'static {
    const ALLOWED: &'static [Role];
}

pub struct AdminOnly;

impl RolePolicy for AdminOnly {
    const ALLOWED: &'static [Role] = &[Role::CompanyAdmin];
}

pub struct AdminOrEmployee;

impl RolePolicy for AdminOrEmployee {
    const ALLOWED: &'static [Role] = &[Role::CompanyAdmin, Role::Employee];
}

/// An authenticated caller whose role is in `P::ALLOWED`.
pub struct RequireRoles<P: RolePolicy> {
    user: User,
    _policy: PhantomData<P>,
}

impl<P: RolePolicy> Deref for RequireRoles<P> {
    type Target = User;

    fn deref(&self) -> &User {
        &self.user
    }
}

impl<P: RolePolicy> FromRequestParts<Arc<AppState>> for RequireRoles<P> {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;

        require_roles(&user, P::ALLOWED).inspect_err(|_| {
            warn!("User {} with role {} denied {} {}", user.id, user.role, parts.method, parts.uri.path());
        })?;

        Ok(Self { user, _policy: PhantomData })
    }
}
