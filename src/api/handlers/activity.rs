use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::requests::ActivityQuery;
use crate::api::extractors::json::AppQuery;
use crate::api::extractors::roles::{AdminOnly, RequireRoles};
use crate::domain::models::scope::CompanyScope;
use std::sync::Arc;

/// Most recent first.
pub async fn list_activities(
    State(state): State<Arc<AppState>>,
    caller: RequireRoles<AdminOnly>,
    AppQuery(query): AppQuery<ActivityQuery>,
) -> Result<impl IntoResponse, AppError> {
    let scope = CompanyScope::of(&caller);
    let logs = state.activity_repo.list_recent(&scope, query.effective_limit()).await?;
    Ok(Json(logs))
}
