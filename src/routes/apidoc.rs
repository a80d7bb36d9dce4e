//! OpenAPI document for every route group.

use crate::auth::PermissionKey;
use crate::error::{ErrorBody, ErrorDetail};
use crate::handlers::{self, PermissionGrant, PermissionsByModule};
use crate::model::{Student, StudentIn};
use crate::response::SuccessBody;
use axum::{routing::get, Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::student::get_student,
        handlers::student::get_students,
        handlers::student::search,
        handlers::student::create_student,
        handlers::student::update_student,
        handlers::student::delete_student,
        handlers::admin::list_permissions,
        handlers::admin::dispatch_permission,
        handlers::admin::remove_permission,
    ),
    components(schemas(
        Student,
        StudentIn,
        SuccessBody,
        ErrorBody,
        ErrorDetail,
        PermissionGrant,
        PermissionKey,
        PermissionsByModule,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "student", description = "学生"),
        (name = "admin", description = "Permission administration"),
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// GET /apidoc/openapi.json
pub fn apidoc_routes() -> Router {
    Router::new().route("/apidoc/openapi.json", get(openapi_json))
}
