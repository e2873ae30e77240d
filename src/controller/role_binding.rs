use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    dto::{
        api::ErrorDto,
        role_binding::{CreateRoleBindingDto, RoleBindingDto},
    },
    error::AppError,
    middleware::auth::AuthGuard,
    model::role_binding::CreateRoleBindingParam,
    service::role_binding::RoleBindingService,
    state::AppState,
};

/// Tag for grouping role binding endpoints in OpenAPI documentation
pub static ROLE_BINDING_TAG: &str = "role-binding";

#[utoipa::path(
    get,
    path = "/api/role-bindings",
    tag = ROLE_BINDING_TAG,
    responses(
        (status = 200, description = "Role bindings", body = Vec<RoleBindingDto>),
        (status = 401, description = "Missing or wrong admin token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn get_role_bindings(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.admin_token, &headers).require()?;

    let bindings = RoleBindingService::new(&state.db).list().await?;
    let dtos: Vec<RoleBindingDto> = bindings.into_iter().map(|b| b.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Bind a guild member's presence role to a tracked channel.
///
/// The role is added to the member when the channel goes live and removed when it
/// goes offline. Binding the same guild and channel again replaces the member and role.
///
/// # Returns
/// - `201 Created` - Binding created or replaced
/// - `400 Bad Request` - Zero ID, invalid handle or channel not tracked
/// - `401 Unauthorized` - Missing or wrong admin token
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/role-bindings",
    tag = ROLE_BINDING_TAG,
    request_body = CreateRoleBindingDto,
    responses(
        (status = 201, description = "Binding created or replaced", body = RoleBindingDto),
        (status = 400, description = "Zero ID, invalid handle or channel not tracked", body = ErrorDto),
        (status = 401, description = "Missing or wrong admin token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn create_role_binding(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateRoleBindingDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.admin_token, &headers).require()?;

    let binding = RoleBindingService::new(&state.db)
        .bind(CreateRoleBindingParam::from(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(binding.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/role-bindings/{id}",
    tag = ROLE_BINDING_TAG,
    params(
        ("id" = i32, Path, description = "Role binding ID")
    ),
    responses(
        (status = 204, description = "Binding removed"),
        (status = 401, description = "Missing or wrong admin token", body = ErrorDto),
        (status = 404, description = "Binding not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn delete_role_binding(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.admin_token, &headers).require()?;

    RoleBindingService::new(&state.db).unbind(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
