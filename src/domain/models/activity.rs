use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use crate::domain::models::scope::CompanyScope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    UserSignup,
    UserLogin,
    CompanyUpdated,
    CompanyDeleted,
    EmployeeCreated,
    EmployeeRoleUpdated,
    EmployeeDeleted,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::UserSignup => "USER_SIGNUP",
            AuditAction::UserLogin => "USER_LOGIN",
            AuditAction::CompanyUpdated => "COMPANY_UPDATED",
            AuditAction::CompanyDeleted => "COMPANY_DELETED",
            AuditAction::EmployeeCreated => "EMPLOYEE_CREATED",
            AuditAction::EmployeeRoleUpdated => "EMPLOYEE_ROLE_UPDATED",
            AuditAction::EmployeeDeleted => "EMPLOYEE_DELETED",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct ActivityLog {
    pub id: String,
    pub user_id: String,
    pub company_id: String,
    pub action: String,
    pub details: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ActivityLog {
    pub fn new(scope: &CompanyScope, user_id: &str, action: AuditAction, details: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            user_id: user_id.to_string(),
            company_id: scope.company_id().to_string(),
            action: action.as_str().to_string(),
            details: Some(details.into()),
            timestamp: Utc::now(),
        }
    }
}
