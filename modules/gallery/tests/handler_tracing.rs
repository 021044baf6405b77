//! Tests to verify that handlers and the service emit the expected traces

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::Utc;
use paging_core::{Collection, Filter, PagingConfig, RecordSource, Window};
use tower::ServiceExt;
use tracing_test::traced_test;
use uuid::Uuid;

use gallery::api::rest::problem::Problem;
use gallery::api::rest::routes;
use gallery::contract::model::{Album, Image};
use gallery::domain::service::Service;

/// Serves one image row, or fails every call.
struct MockImages {
    fail: bool,
    delay: Option<Duration>,
}

#[async_trait]
impl RecordSource for MockImages {
    type Record = Image;

    fn collection(&self) -> Collection {
        Collection::Images
    }

    async fn count(&self, _filter: &Filter) -> anyhow::Result<u64> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            anyhow::bail!("disk on fire");
        }
        Ok(1)
    }

    async fn find_many(&self, filter: &Filter, _window: Window) -> anyhow::Result<Vec<Image>> {
        if self.fail {
            anyhow::bail!("disk on fire");
        }
        Ok(vec![Image {
            image_id: 1,
            image_path: "a.jpg".into(),
            upload_date: Utc::now(),
            update_date: None,
            original_width: 10,
            original_height: 10,
            uploaded_by: filter.owner_id().unwrap_or_default(),
            faces: vec![],
        }])
    }
}

struct NoAlbums;

#[async_trait]
impl RecordSource for NoAlbums {
    type Record = Album;

    fn collection(&self) -> Collection {
        Collection::Albums
    }

    async fn count(&self, _filter: &Filter) -> anyhow::Result<u64> {
        Ok(0)
    }

    async fn find_many(&self, _filter: &Filter, _window: Window) -> anyhow::Result<Vec<Album>> {
        Ok(vec![])
    }
}

fn router_with(images: MockImages, config: &PagingConfig) -> axum::Router {
    let service = Service::new(Arc::new(images), Arc::new(NoAlbums), config);
    routes::router(Arc::new(service))
}

async fn call(router: axum::Router) -> (StatusCode, Vec<u8>) {
    let resp = router
        .oneshot(
            Request::builder()
                .uri("/images")
                .header("x-user-id", Uuid::new_v4().to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

#[tokio::test]
#[traced_test]
async fn successful_listing_is_traced() {
    let router = router_with(
        MockImages {
            fail: false,
            delay: None,
        },
        &PagingConfig::default(),
    );

    let (status, _) = call(router).await;
    assert_eq!(status, StatusCode::OK);
    assert!(logs_contain("Listing images"));
    assert!(logs_contain("gallery.service.list_images"));
    assert!(logs_contain("http_request"));
}

#[tokio::test]
#[traced_test]
async fn store_failure_is_logged_but_hidden_from_caller() {
    let router = router_with(
        MockImages {
            fail: true,
            delay: None,
        },
        &PagingConfig::default(),
    );

    let (status, body) = call(router).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let problem: Problem = serde_json::from_slice(&body).unwrap();
    assert!(!problem.detail.contains("disk on fire"));

    assert!(logs_contain("gallery listing failed"));
    assert!(logs_contain("disk on fire"));
}

#[tokio::test]
#[traced_test]
async fn slow_store_maps_to_service_unavailable() {
    let config = PagingConfig {
        query_timeout_ms: 20,
        ..PagingConfig::default()
    };
    let router = router_with(
        MockImages {
            fail: false,
            delay: Some(Duration::from_millis(500)),
        },
        &config,
    );

    let (status, body) = call(router).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let problem: Problem = serde_json::from_slice(&body).unwrap();
    assert_eq!(problem.code, "GALLERY_TIMEOUT");
    assert!(logs_contain("gallery listing failed"));
}
