use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    http::{HeaderMap, StatusCode, Uri},
    Json,
};
use tracing::{error, info};
use uuid::Uuid;

use crate::api::rest::dto::{AlbumsPageDto, ImagesPageDto, ListQueryDto};
use crate::api::rest::error::{from_parts, map_domain_error};
use crate::api::rest::problem::ProblemResponse;
use crate::api::rest::request_id::XRequestId;
use crate::contract::model::ListQuery;
use crate::domain::service::Service;

/// Identity header set by the upstream authentication layer.
pub const USER_ID_HEADER: &str = "x-user-id";

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// List the caller's images
pub async fn list_images(
    Extension(svc): Extension<Arc<Service>>,
    Extension(rid): Extension<XRequestId>,
    headers: HeaderMap,
    uri: Uri,
    query: Result<Query<ListQueryDto>, QueryRejection>,
) -> Result<Json<ImagesPageDto>, ProblemResponse> {
    let query = list_query(&headers, query, &uri).map_err(|p| p.with_trace_id(&rid.0))?;
    info!(owner_id = %query.owner_id, mode = ?query.mode, "Listing images");

    match svc.list_images(&query).await {
        Ok(page) => Ok(Json(page.into())),
        Err(e) => {
            error!("Failed to list images: {}", e);
            Err(map_domain_error(&e, uri.path()).with_trace_id(&rid.0))
        }
    }
}

/// List the caller's albums
pub async fn list_albums(
    Extension(svc): Extension<Arc<Service>>,
    Extension(rid): Extension<XRequestId>,
    headers: HeaderMap,
    uri: Uri,
    query: Result<Query<ListQueryDto>, QueryRejection>,
) -> Result<Json<AlbumsPageDto>, ProblemResponse> {
    let query = list_query(&headers, query, &uri).map_err(|p| p.with_trace_id(&rid.0))?;
    info!(owner_id = %query.owner_id, mode = ?query.mode, "Listing albums");

    match svc.list_albums(&query).await {
        Ok(page) => Ok(Json(page.into())),
        Err(e) => {
            error!("Failed to list albums: {}", e);
            Err(map_domain_error(&e, uri.path()).with_trace_id(&rid.0))
        }
    }
}

fn list_query(
    headers: &HeaderMap,
    query: Result<Query<ListQueryDto>, QueryRejection>,
    uri: &Uri,
) -> Result<ListQuery, ProblemResponse> {
    let owner = caller_id(headers, uri)?;
    let Query(dto) = query.map_err(|rejection| {
        from_parts(
            StatusCode::BAD_REQUEST,
            "GALLERY_INVALID_QUERY",
            "Invalid query string",
            rejection.body_text(),
            uri.path(),
        )
    })?;
    Ok(dto.into_query(owner))
}

fn caller_id(headers: &HeaderMap, uri: &Uri) -> Result<Uuid, ProblemResponse> {
    let Some(raw) = headers.get(USER_ID_HEADER) else {
        return Err(from_parts(
            StatusCode::UNAUTHORIZED,
            "GALLERY_UNAUTHENTICATED",
            "Missing caller identity",
            format!("The {USER_ID_HEADER} header is required"),
            uri.path(),
        ));
    };

    raw.to_str()
        .ok()
        .and_then(|s| Uuid::parse_str(s.trim()).ok())
        .ok_or_else(|| {
            from_parts(
                StatusCode::BAD_REQUEST,
                "GALLERY_INVALID_REQUEST",
                "Invalid request",
                format!("The {USER_ID_HEADER} header must be a UUID"),
                uri.path(),
            )
        })
}
