use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::requests::UpdateCompanyRequest;
use crate::api::extractors::json::AppJson;
use crate::api::extractors::roles::{AdminOnly, AdminOrEmployee, RequireRoles};
use crate::domain::models::{
    activity::{ActivityLog, AuditAction},
    scope::CompanyScope,
};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

pub async fn get_my_company(
    State(state): State<Arc<AppState>>,
    caller: RequireRoles<AdminOrEmployee>,
) -> Result<impl IntoResponse, AppError> {
    let scope = CompanyScope::of(&caller);
    let company = state.company_repo.find(&scope).await?
        .ok_or(AppError::NotFound("Company not found".into()))?;
    Ok(Json(company))
}

pub async fn update_my_company(
    State(state): State<Arc<AppState>>,
    caller: RequireRoles<AdminOnly>,
    AppJson(payload): AppJson<UpdateCompanyRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let scope = CompanyScope::of(&caller);
    let mut company = state.company_repo.find(&scope).await?
        .ok_or(AppError::NotFound("Company not found".into()))?;

    if let Some(name) = payload.name {
        let name = name.trim().to_string();
        if state.company_repo.name_taken_by_other(&scope, &name).await? {
            return Err(AppError::NameTaken);
        }
        company.name = name;
    }
    if let Some(status) = payload.status {
        company.status = status;
    }

    let log = ActivityLog::new(&scope, &caller.id, AuditAction::CompanyUpdated, "Company profile updated");
    let updated = state.company_repo.update(&scope, &company, &log).await?;

    info!("Company updated: {}", updated.id);
    Ok(Json(updated))
}

/// Hard delete; the company's users are removed with it.
pub async fn delete_my_company(
    State(state): State<Arc<AppState>>,
    caller: RequireRoles<AdminOnly>,
) -> Result<impl IntoResponse, AppError> {
    let scope = CompanyScope::of(&caller);
    let log = ActivityLog::new(&scope, &caller.id, AuditAction::CompanyDeleted, "Company profile deleted");
    state.company_repo.delete(&scope, &log).await?;

    info!("Company deleted: {}", scope.company_id());
    Ok(StatusCode::NO_CONTENT)
}
