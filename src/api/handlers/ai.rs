use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::roles::{AdminOnly, RequireRoles};
use crate::domain::models::scope::CompanyScope;
use crate::error::AppError;
use std::sync::Arc;

pub async fn get_insights(
    State(state): State<Arc<AppState>>,
    caller: RequireRoles<AdminOnly>,
) -> Result<impl IntoResponse, AppError> {
    let scope = CompanyScope::of(&caller);
    let insights = state.insights_provider.generate_insights(&scope).await?;
    Ok(Json(insights))
}
