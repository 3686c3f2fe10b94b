use axum::extract::{FromRequest, FromRequestParts};
use crate::error::AppError;

/// `axum::Json` whose rejections render as a 400 `{"detail"}` body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Query` with the same rejection shape.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
