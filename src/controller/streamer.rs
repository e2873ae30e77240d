use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    dto::{
        api::ErrorDto,
        streamer::{CreateTrackedChannelDto, TestNotificationDto, TrackedChannelDto},
    },
    error::AppError,
    middleware::auth::AuthGuard,
    model::{platform::Platform, streamer::CreateTrackedChannelParam},
    service::streamer::StreamerService,
    state::AppState,
};

/// Tag for grouping streamer endpoints in OpenAPI documentation
pub static STREAMER_TAG: &str = "streamer";

/// List tracked channels.
///
/// Returns every tracked channel together with its live status as of the last finished
/// poll cycle. Channels that have not been evaluated yet carry no live state.
///
/// # Returns
/// - `200 OK` - Tracked channels
/// - `401 Unauthorized` - Missing or wrong admin token
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/streamers",
    tag = STREAMER_TAG,
    responses(
        (status = 200, description = "Tracked channels", body = Vec<TrackedChannelDto>),
        (status = 401, description = "Missing or wrong admin token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn get_streamers(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.admin_token, &headers).require()?;

    let channels = StreamerService::new(&state.db).list_tracked().await?;
    let states = state.live_states.read().await;

    let dtos: Vec<TrackedChannelDto> = channels
        .into_iter()
        .map(|channel| {
            let live = states.get(&channel.key());
            channel.into_dto(live)
        })
        .collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Start tracking a channel.
///
/// The handle may be a bare channel name, `@name` or a channel URL; it is stored
/// normalized. The channel is probed from the next poll cycle on.
///
/// # Returns
/// - `201 Created` - Channel is now tracked
/// - `400 Bad Request` - Invalid handle or channel already tracked
/// - `401 Unauthorized` - Missing or wrong admin token
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/streamers",
    tag = STREAMER_TAG,
    request_body = CreateTrackedChannelDto,
    responses(
        (status = 201, description = "Channel is now tracked", body = TrackedChannelDto),
        (status = 400, description = "Invalid handle or channel already tracked", body = ErrorDto),
        (status = 401, description = "Missing or wrong admin token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn create_streamer(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateTrackedChannelDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.admin_token, &headers).require()?;

    let channel = StreamerService::new(&state.db)
        .add_tracked(CreateTrackedChannelParam::from(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(channel.into_dto(None))))
}

/// Stop tracking a channel.
///
/// Also removes the channel's role bindings and cached live state.
///
/// # Returns
/// - `204 No Content` - Channel removed
/// - `401 Unauthorized` - Missing or wrong admin token
/// - `404 Not Found` - Channel is not tracked
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    delete,
    path = "/api/streamers/{platform}/{handle}",
    tag = STREAMER_TAG,
    params(
        ("platform" = Platform, Path, description = "Streaming platform"),
        ("handle" = String, Path, description = "Channel handle")
    ),
    responses(
        (status = 204, description = "Channel removed"),
        (status = 401, description = "Missing or wrong admin token", body = ErrorDto),
        (status = 404, description = "Channel is not tracked", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn delete_streamer(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((platform, handle)): Path<(Platform, String)>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.admin_token, &headers).require()?;

    StreamerService::new(&state.db)
        .remove_tracked(platform, &handle)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Send a test alert for a channel.
///
/// Probes the channel once and, if it is live, sends the alert to every notification
/// target regardless of the poller's state. The poller's state is not modified.
///
/// # Returns
/// - `200 OK` - Probe answered; counts of delivered and failed alerts
/// - `401 Unauthorized` - Missing or wrong admin token
/// - `404 Not Found` - Channel is not tracked
/// - `502 Bad Gateway` - Live status could not be determined
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/streamers/{platform}/{handle}/test",
    tag = STREAMER_TAG,
    params(
        ("platform" = Platform, Path, description = "Streaming platform"),
        ("handle" = String, Path, description = "Channel handle")
    ),
    responses(
        (status = 200, description = "Probe answered", body = TestNotificationDto),
        (status = 401, description = "Missing or wrong admin token", body = ErrorDto),
        (status = 404, description = "Channel is not tracked", body = ErrorDto),
        (status = 502, description = "Live status could not be determined", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn test_streamer_notification(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((platform, handle)): Path<(Platform, String)>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.admin_token, &headers).require()?;

    let outcome = StreamerService::new(&state.db)
        .test_notification(
            platform,
            &handle,
            &state.probers,
            state.sink.as_ref(),
            state.probe_timeout,
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(TestNotificationDto {
            live: outcome.live,
            delivered: outcome.report.delivered_count(),
            failed: outcome.report.failed_count(),
        }),
    ))
}
