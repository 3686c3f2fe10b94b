use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::{
    requests::{CreateEmployeeRequest, UpdateEmployeeRequest},
    responses::UserResponse,
};
use crate::api::extractors::json::AppJson;
use crate::api::extractors::roles::{AdminOnly, RequireRoles};
use crate::domain::models::{
    activity::{ActivityLog, AuditAction},
    scope::CompanyScope,
    user::{Role, User},
};
use crate::domain::services::password::hash_password;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

fn parse_role(raw: &str) -> Result<Role, AppError> {
    raw.parse().map_err(|_| AppError::Validation("Invalid role".into()))
}

pub async fn list_employees(
    State(state): State<Arc<AppState>>,
    caller: RequireRoles<AdminOnly>,
) -> Result<impl IntoResponse, AppError> {
    let scope = CompanyScope::of(&caller);
    let users = state.user_repo.list(&scope).await?;
    let employees: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(employees))
}

pub async fn create_employee(
    State(state): State<Arc<AppState>>,
    caller: RequireRoles<AdminOnly>,
    AppJson(payload): AppJson<CreateEmployeeRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    if state.user_repo.find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::EmailTaken);
    }
    let role = parse_role(&payload.role)?;

    let scope = CompanyScope::of(&caller);
    let password_hash = hash_password(&payload.password)?;
    let user = User::new(scope.company_id().to_string(), payload.email, password_hash, role);

    let log = ActivityLog::new(
        &scope,
        &caller.id,
        AuditAction::EmployeeCreated,
        format!("Employee {} added with role {}", user.email, user.role),
    );
    let created = state.user_repo.create(&scope, &user, &log).await?;

    info!("Created employee {} in company {}", created.id, created.company_id);
    Ok(Json(UserResponse::from(created)))
}

pub async fn update_employee_role(
    State(state): State<Arc<AppState>>,
    caller: RequireRoles<AdminOnly>,
    Path(user_id): Path<String>,
    AppJson(payload): AppJson<UpdateEmployeeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let scope = CompanyScope::of(&caller);
    let mut target = state.user_repo.find_in_company(&scope, &user_id).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    target.role = parse_role(&payload.role)?;

    let log = ActivityLog::new(
        &scope,
        &caller.id,
        AuditAction::EmployeeRoleUpdated,
        format!("Employee {} role updated to {}", target.email, target.role),
    );
    let updated = state.user_repo.update_role(&scope, &target, &log).await?;

    info!("Updated role of {} to {}", updated.id, updated.role);
    Ok(Json(UserResponse::from(updated)))
}

pub async fn delete_employee(
    State(state): State<Arc<AppState>>,
    caller: RequireRoles<AdminOnly>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let scope = CompanyScope::of(&caller);
    let target = state.user_repo.find_in_company(&scope, &user_id).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    if target.id == caller.id {
        return Err(AppError::SelfDeletion);
    }

    let log = ActivityLog::new(&scope, &caller.id, AuditAction::EmployeeDeleted, format!("Employee {} removed", target.email));
    state.user_repo.delete(&scope, &target.id, &log).await?;

    info!("Deleted user {}", target.id);
    Ok(StatusCode::NO_CONTENT)
}
