//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every auth, guestbook and health endpoint together
//! with the schema wrappers from `inbound::http::schemas`. The document is
//! served by Swagger UI in debug builds and exported with
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::auth::{LoginRequest, RoleResponse, SuccessResponse};
use crate::inbound::http::guestbook::{
    CreateEntryBody, DeleteEntryBody, EntryResponse, GuestbookPageResponse, PinRequest,
    PinnedResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, RoleSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the role cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                crate::inbound::http::session::SESSION_COOKIE,
                "Role cookie issued by POST /api/v1/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Fan site backend API",
        description = "Role login and a bounded guestbook for the fan site.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::current_session,
        crate::inbound::http::guestbook::list_entries,
        crate::inbound::http::guestbook::create_entry,
        crate::inbound::http::guestbook::delete_entry,
        crate::inbound::http::guestbook::get_pinned,
        crate::inbound::http::guestbook::set_pinned,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RoleSchema,
        LoginRequest,
        RoleResponse,
        SuccessResponse,
        EntryResponse,
        GuestbookPageResponse,
        CreateEntryBody,
        DeleteEntryBody,
        PinRequest,
        PinnedResponse,
    )),
    tags(
        (name = "auth", description = "Role login backed by the admin_session cookie"),
        (name = "guestbook", description = "Bounded guestbook with a single pinned entry"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
