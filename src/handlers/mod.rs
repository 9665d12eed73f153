//! HTTP handlers

pub mod health;
pub mod predictor;

use crate::{AppError, AppResult};

/// Anything outside the single page
pub async fn not_found() -> AppResult<()> {
    Err(AppError::NotFound("Page not found".to_string()))
}
