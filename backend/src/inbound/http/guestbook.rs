//! Guestbook endpoints.
//!
//! ```text
//! GET    /api/v1/guestbook?page=1&limit=50
//! POST   /api/v1/guestbook            {"author","content","userKey"}
//! DELETE /api/v1/guestbook/{id}       {"userKey"} (optional for admins)
//! GET    /api/v1/guestbook/pinned
//! PUT    /api/v1/guestbook/pinned     {"id"}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use pagination::{PageParams, PageRequest, PageRequestError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{CreateEntryRequest, DeleteEntryRequest};
use crate::domain::{EntryId, Error, GuestbookEntry};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::SuccessResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Public view of a stored entry. The author's `userKey` is withheld.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryResponse {
    #[schema(value_type = String, format = Uuid)]
    pub id: Uuid,
    pub author: String,
    pub content: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

impl From<GuestbookEntry> for EntryResponse {
    fn from(entry: GuestbookEntry) -> Self {
        Self {
            id: *entry.id.as_uuid(),
            author: entry.author,
            content: entry.content,
            created_at: entry.created_at,
        }
    }
}

/// One page of entries, newest first.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GuestbookPageResponse {
    pub items: Vec<EntryResponse>,
    pub page: u32,
    pub limit: u32,
}

/// Request body for `POST /guestbook`. Missing fields read as empty.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateEntryBody {
    #[schema(example = "Mio")]
    pub author: String,
    #[schema(example = "Great stream tonight!")]
    pub content: String,
    #[schema(example = "5f0c1d8e-browser-key")]
    pub user_key: String,
}

/// Request body for `DELETE /guestbook/{id}`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct DeleteEntryBody {
    pub user_key: Option<String>,
}

/// Request body for `PUT /guestbook/pinned`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct PinRequest {
    #[schema(example = "0190f1a2-7b3c-7d4e-8f90-123456789abc")]
    pub id: String,
}

/// Current pin, `null` when nothing is pinned.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PinnedResponse {
    #[schema(value_type = Option<String>, format = Uuid)]
    pub pinned_id: Option<Uuid>,
}

impl From<Option<EntryId>> for PinnedResponse {
    fn from(id: Option<EntryId>) -> Self {
        Self {
            pinned_id: id.map(|id| *id.as_uuid()),
        }
    }
}

fn map_page_error(error: PageRequestError) -> Error {
    let field = match error {
        PageRequestError::InvalidPage { .. } => "page",
        PageRequestError::InvalidLimit { .. } => "limit",
    };
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": field,
        "code": "validation_error",
    }))
}

/// List entries newest first.
#[utoipa::path(
    get,
    path = "/api/v1/guestbook",
    params(
        ("page" = Option<u32>, Query, description = "One-based page number, default 1"),
        ("limit" = Option<u32>, Query, description = "Page size, default 50")
    ),
    responses(
        (status = 200, description = "Guestbook page", body = GuestbookPageResponse),
        (status = 400, description = "Invalid page or limit", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["guestbook"],
    operation_id = "listGuestbookEntries",
    security([])
)]
#[get("/guestbook")]
pub async fn list_entries(
    state: web::Data<HttpState>,
    params: web::Query<PageParams>,
) -> ApiResult<web::Json<GuestbookPageResponse>> {
    let request = PageRequest::try_from(params.into_inner()).map_err(map_page_error)?;
    let page = state.guestbook_query.list_entries(request).await?;
    let (page_number, limit) = (page.page(), page.limit());
    Ok(web::Json(GuestbookPageResponse {
        items: page.into_items().into_iter().map(EntryResponse::from).collect(),
        page: page_number,
        limit,
    }))
}

/// Sign the guestbook. At capacity the oldest entry is evicted first.
#[utoipa::path(
    post,
    path = "/api/v1/guestbook",
    request_body = CreateEntryBody,
    responses(
        (status = 201, description = "Entry created", body = EntryResponse),
        (status = 400, description = "Missing or empty field", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["guestbook"],
    operation_id = "createGuestbookEntry",
    security([])
)]
#[post("/guestbook")]
pub async fn create_entry(
    state: web::Data<HttpState>,
    payload: web::Json<CreateEntryBody>,
) -> ApiResult<HttpResponse> {
    let CreateEntryBody {
        author,
        content,
        user_key,
    } = payload.into_inner();
    let entry = state
        .guestbook
        .create_entry(CreateEntryRequest {
            author,
            content,
            user_key,
        })
        .await?;
    Ok(HttpResponse::Created().json(EntryResponse::from(entry)))
}

/// Delete an entry as its author or as an admin.
#[utoipa::path(
    delete,
    path = "/api/v1/guestbook/{id}",
    params(("id" = String, Path, description = "Entry identifier")),
    request_body(content = DeleteEntryBody, description = "Author proof; optional for admins"),
    responses(
        (status = 200, description = "Entry deleted", body = SuccessResponse),
        (status = 403, description = "Neither author nor admin", body = ErrorSchema),
        (status = 404, description = "Entry not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["guestbook"],
    operation_id = "deleteGuestbookEntry",
    security([])
)]
#[delete("/guestbook/{id}")]
pub async fn delete_entry(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: Option<web::Json<DeleteEntryBody>>,
) -> ApiResult<web::Json<SuccessResponse>> {
    let user_key = payload.and_then(|body| body.into_inner().user_key);
    state
        .guestbook
        .delete_entry(DeleteEntryRequest {
            id: path.into_inner(),
            user_key,
            role: session.role(),
        })
        .await?;
    Ok(web::Json(SuccessResponse::ok()))
}

/// Read the pinned entry id.
#[utoipa::path(
    get,
    path = "/api/v1/guestbook/pinned",
    responses(
        (status = 200, description = "Pinned entry id or null", body = PinnedResponse),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["guestbook"],
    operation_id = "getPinnedGuestbookEntry",
    security([])
)]
#[get("/guestbook/pinned")]
pub async fn get_pinned(state: web::Data<HttpState>) -> ApiResult<web::Json<PinnedResponse>> {
    let pinned = state.guestbook_query.pinned_entry().await?;
    Ok(web::Json(PinnedResponse::from(pinned)))
}

/// Pin an entry. Admin only.
#[utoipa::path(
    put,
    path = "/api/v1/guestbook/pinned",
    request_body = PinRequest,
    responses(
        (status = 200, description = "Pin updated", body = PinnedResponse),
        (status = 400, description = "Malformed entry id", body = ErrorSchema),
        (status = 403, description = "Admin role required", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["guestbook"],
    operation_id = "setPinnedGuestbookEntry",
    security([])
)]
#[put("/guestbook/pinned")]
pub async fn set_pinned(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<PinRequest>,
) -> ApiResult<web::Json<PinnedResponse>> {
    let id = state
        .guestbook
        .set_pinned(&payload.into_inner().id, session.role())
        .await?;
    Ok(web::Json(PinnedResponse::from(Some(id))))
}

#[cfg(test)]
#[path = "guestbook_tests.rs"]
mod tests;
