use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use bookhub_http::{ApiJson, AppError, MessageResponse};

use super::models::{LoginRequest, RegisterRequest};
use super::service::AuthService;

pub async fn register(
    State(service): State<Arc<AuthService>>,
    ApiJson(input): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    service.register(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

pub async fn login(
    State(service): State<Arc<AuthService>>,
    ApiJson(input): ApiJson<LoginRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    service.login(input).await?;
    Ok(Json(MessageResponse::new("Login successful")))
}
