use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::{
    requests::{LoginRequest, RefreshRequest, SignupRequest},
    responses::{MessageResponse, UserResponse},
};
use crate::api::extractors::{auth::AuthUser, json::AppJson};
use std::sync::Arc;
use validator::Validate;

pub async fn signup(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    state.auth_service
        .signup(payload.company_name.trim(), &payload.email, &payload.password)
        .await?;

    Ok(Json(MessageResponse { message: "Signup successful" }))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(|_| AppError::InvalidCredentials)?;

    let pair = state.auth_service.login(&payload.email, &payload.password).await?;
    Ok(Json(pair))
}

pub async fn refresh(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<RefreshRequest>,
) -> Result<impl IntoResponse, AppError> {
    let pair = state.auth_service.refresh(&payload.refresh_token).await?;
    Ok(Json(pair))
}

pub async fn me(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(UserResponse::from(user))
}
