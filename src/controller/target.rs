use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    dto::{
        api::ErrorDto,
        target::{CreateNotificationTargetDto, NotificationTargetDto},
    },
    error::AppError,
    middleware::auth::AuthGuard,
    model::notification_target::CreateNotificationTargetParam,
    service::target::NotificationTargetService,
    state::AppState,
};

/// Tag for grouping notification target endpoints in OpenAPI documentation
pub static TARGET_TAG: &str = "target";

/// List notification targets.
#[utoipa::path(
    get,
    path = "/api/targets",
    tag = TARGET_TAG,
    responses(
        (status = 200, description = "Notification targets", body = Vec<NotificationTargetDto>),
        (status = 401, description = "Missing or wrong admin token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn get_targets(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.admin_token, &headers).require()?;

    let targets = NotificationTargetService::new(&state.db).list().await?;
    let dtos: Vec<NotificationTargetDto> = targets.into_iter().map(|t| t.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Register a Discord channel to receive live alerts.
///
/// # Returns
/// - `201 Created` - Target registered
/// - `400 Bad Request` - Zero channel ID or channel already registered
/// - `401 Unauthorized` - Missing or wrong admin token
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/targets",
    tag = TARGET_TAG,
    request_body = CreateNotificationTargetDto,
    responses(
        (status = 201, description = "Target registered", body = NotificationTargetDto),
        (status = 400, description = "Zero channel ID or channel already registered", body = ErrorDto),
        (status = 401, description = "Missing or wrong admin token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn create_target(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateNotificationTargetDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.admin_token, &headers).require()?;

    let target = NotificationTargetService::new(&state.db)
        .add(CreateNotificationTargetParam::from(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(target.into_dto())))
}

/// Stop sending alerts to a Discord channel.
#[utoipa::path(
    delete,
    path = "/api/targets/{channel_id}",
    tag = TARGET_TAG,
    params(
        ("channel_id" = u64, Path, description = "Discord channel ID")
    ),
    responses(
        (status = 204, description = "Target removed"),
        (status = 401, description = "Missing or wrong admin token", body = ErrorDto),
        (status = 404, description = "Channel is not a target", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn delete_target(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(channel_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.admin_token, &headers).require()?;

    NotificationTargetService::new(&state.db)
        .remove(channel_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
