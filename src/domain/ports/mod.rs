use crate::domain::models::{
    activity::ActivityLog, company::Company, insights::Insights, scope::CompanyScope, user::User,
};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn find(&self, scope: &CompanyScope) -> Result<Option<Company>, AppError>;
    /// Saves name/status and appends `audit` in one transaction.
    /// A name held by another company yields `NameTaken`.
    async fn update(&self, scope: &CompanyScope, company: &Company, audit: &ActivityLog) -> Result<Company, AppError>;
    /// Hard delete. Users of the company go with it through the foreign key.
    async fn delete(&self, scope: &CompanyScope, audit: &ActivityLog) -> Result<(), AppError>;
    async fn name_taken_by_other(&self, scope: &CompanyScope, name: &str) -> Result<bool, AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates the company named `company_name` unless it already exists and
    /// inserts a user into it: `COMPANY_ADMIN` when the company is new,
    /// `EMPLOYEE` when joining an existing one. `USER_SIGNUP` is appended in the
    /// same transaction. Duplicate email yields `EmailTaken`.
    async fn signup(&self, company_name: &str, email: &str, password_hash: &str) -> Result<User, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    /// Unscoped lookup used only to resolve the subject of a verified token.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn find_in_company(&self, scope: &CompanyScope, id: &str) -> Result<Option<User>, AppError>;
    async fn list(&self, scope: &CompanyScope) -> Result<Vec<User>, AppError>;
    async fn count(&self, scope: &CompanyScope) -> Result<i64, AppError>;
    async fn create(&self, scope: &CompanyScope, user: &User, audit: &ActivityLog) -> Result<User, AppError>;
    async fn update_role(&self, scope: &CompanyScope, user: &User, audit: &ActivityLog) -> Result<User, AppError>;
    async fn delete(&self, scope: &CompanyScope, id: &str, audit: &ActivityLog) -> Result<(), AppError>;
}

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn append(&self, log: &ActivityLog) -> Result<(), AppError>;
    async fn list_recent(&self, scope: &CompanyScope, limit: i64) -> Result<Vec<ActivityLog>, AppError>;
}

#[async_trait]
pub trait InsightsProvider: Send + Sync {
    async fn generate_insights(&self, scope: &CompanyScope) -> Result<Insights, AppError>;
}
