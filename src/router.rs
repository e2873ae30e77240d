use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::{
    controller::{
        role_binding::{self, create_role_binding, delete_role_binding, get_role_bindings},
        streamer::{
            self, create_streamer, delete_streamer, get_streamers, test_streamer_notification,
        },
        target::{self, create_target, delete_target, get_targets},
    },
    dto::{
        api::ErrorDto,
        role_binding::{CreateRoleBindingDto, RoleBindingDto},
        streamer::{CreateTrackedChannelDto, LiveStateDto, TestNotificationDto, TrackedChannelDto},
        target::{CreateNotificationTargetDto, NotificationTargetDto},
    },
    model::platform::Platform,
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        streamer::get_streamers,
        streamer::create_streamer,
        streamer::delete_streamer,
        streamer::test_streamer_notification,
        target::get_targets,
        target::create_target,
        target::delete_target,
        role_binding::get_role_bindings,
        role_binding::create_role_binding,
        role_binding::delete_role_binding,
    ),
    components(schemas(
        Platform,
        ErrorDto,
        CreateTrackedChannelDto,
        TrackedChannelDto,
        LiveStateDto,
        TestNotificationDto,
        CreateNotificationTargetDto,
        NotificationTargetDto,
        CreateRoleBindingDto,
        RoleBindingDto,
    )),
    modifiers(&BearerSecurity),
)]
pub struct ApiDoc;

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/docs/openapi.json", get(openapi))
        .route("/api/streamers", get(get_streamers).post(create_streamer))
        .route("/api/streamers/{platform}/{handle}", delete(delete_streamer))
        .route(
            "/api/streamers/{platform}/{handle}/test",
            post(test_streamer_notification),
        )
        .route("/api/targets", get(get_targets).post(create_target))
        .route("/api/targets/{channel_id}", delete(delete_target))
        .route(
            "/api/role-bindings",
            get(get_role_bindings).post(create_role_binding),
        )
        .route("/api/role-bindings/{id}", delete(delete_role_binding))
}
