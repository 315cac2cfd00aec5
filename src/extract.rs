//! Request extractors

use axum::extract::FromRequest;

use crate::AppError;

/// `axum::Json` whose rejection is an `AppError` (400 with the JSON error body)
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
