use std::sync::Arc;

use axum::{middleware::from_fn, routing::get, Extension, Router};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};

use crate::api::rest::{handlers, request_id};
use crate::domain::service::Service;

/// REST surface of the gallery. Layers run outermost first:
/// PropagateRequestId -> SetRequestId -> Trace -> push_req_id_to_extensions.
pub fn router(service: Arc<Service>) -> Router {
    let x_request_id = request_id::header();

    Router::new()
        .route("/health", get(handlers::health))
        .route("/images", get(handlers::list_images))
        .route("/albums", get(handlers::list_albums))
        .layer(Extension(service))
        .layer(from_fn(request_id::push_req_id_to_extensions))
        .layer(request_id::create_trace_layer())
        .layer(SetRequestIdLayer::new(
            x_request_id.clone(),
            request_id::MakeReqId,
        ))
        .layer(PropagateRequestIdLayer::new(x_request_id))
}
