use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::responses::DashboardMetrics;
use crate::api::extractors::roles::{AdminOrEmployee, RequireRoles};
use crate::domain::models::scope::CompanyScope;
use std::sync::Arc;

pub async fn get_metrics(
    State(state): State<Arc<AppState>>,
    caller: RequireRoles<AdminOrEmployee>,
) -> Result<impl IntoResponse, AppError> {
    let scope = CompanyScope::of(&caller);
    let total_users = state.user_repo.count(&scope).await?;
    let company = state.company_repo.find(&scope).await?;

    let (company_name, company_status) = match company {
        Some(c) => (c.name, c.status),
        None => ("Unknown".to_string(), "Unknown".to_string()),
    };

    Ok(Json(DashboardMetrics {
        total_users,
        company_name,
        company_status,
        active_features: vec!["ai_insights", "activity_tracking"],
    }))
}
