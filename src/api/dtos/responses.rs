use serde::Serialize;
use crate::domain::models::user::{Role, User};

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Caller summary for `/auth/me` and the employee listing.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub company_id: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            company_id: user.company_id,
        }
    }
}

#[derive(Serialize)]
pub struct DashboardMetrics {
    pub total_users: i64,
    pub company_name: String,
    pub company_status: String,
    pub active_features: Vec<&'static str>,
}
