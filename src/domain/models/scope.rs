use crate::domain::models::user::User;

/// The tenant every scoped read or write is filtered by.
///
/// Only a persisted [`User`] can produce one, so handlers never scope by a
/// company id taken from the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyScope {
    company_id: String,
}

impl CompanyScope {
    pub fn of(user: &User) -> Self {
        Self { company_id: user.company_id.clone() }
    }

    pub fn company_id(&self) -> &str {
        &self.company_id
    }
}
