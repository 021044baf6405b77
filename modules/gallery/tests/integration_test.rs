//! Integration-style tests for the gallery module.
//!
//! Each test runs on a fresh in-memory SQLite database with the demo data set.
//! The service, the local client and the REST router are exercised against
//! the same wiring the server uses.

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chrono::NaiveDate;
use gallery::api::rest::dto::{AlbumsPageDto, ImagesPageDto, PaginationDto};
use gallery::api::rest::problem::Problem;
use gallery::contract::{GalleryError, ListQuery, PageInfo, PaginationMode};
use tower::ServiceExt;
use uuid::Uuid;

use common::seeded_gallery;

fn image_ids(page: &gallery::contract::Page<gallery::contract::Image>) -> Vec<i64> {
    page.items.iter().map(|i| i.image_id).collect()
}

fn cursor_query(owner: Uuid, limit: i64) -> ListQuery {
    ListQuery {
        mode: PaginationMode::Cursor,
        limit: Some(limit),
        ..ListQuery::for_owner(owner)
    }
}

#[tokio::test]
async fn offset_page_carries_faces_and_metadata() {
    let (gallery, owner) = seeded_gallery().await;
    let query = ListQuery {
        page: Some(2),
        limit: Some(3),
        ..ListQuery::for_owner(owner)
    };

    let page = gallery.service().list_images(&query).await.unwrap();
    assert_eq!(image_ids(&page), vec![4, 5, 6]);

    let PageInfo::Offset(info) = &page.pagination else {
        panic!("expected offset metadata");
    };
    assert_eq!(info.total, 7);
    assert_eq!(info.total_pages, 3);
    assert!(info.has_next_page && info.has_previous_page);
    assert_eq!((info.item_start, info.item_end), (4, 6));

    let six = &page.items[2];
    assert_eq!(six.faces.len(), 1);
    assert_eq!(six.faces[0].bounding_box.right, 120.0);
    assert!(page.items[0].faces.is_empty());
}

#[tokio::test]
async fn cursor_walk_forward_and_back() {
    let (gallery, owner) = seeded_gallery().await;
    let svc = gallery.service();

    let first = svc.list_images(&cursor_query(owner, 3)).await.unwrap();
    assert_eq!(image_ids(&first), vec![1, 2, 3]);
    let PageInfo::Cursor(info) = first.pagination.clone() else {
        panic!("expected cursor metadata");
    };
    assert!(info.has_more_items);

    let second = svc
        .list_images(&ListQuery {
            next_cursor: info.next_cursor.clone(),
            ..cursor_query(owner, 3)
        })
        .await
        .unwrap();
    assert_eq!(image_ids(&second), vec![4, 5, 6]);
    let PageInfo::Cursor(second_info) = second.pagination.clone() else {
        panic!("expected cursor metadata");
    };

    let last = svc
        .list_images(&ListQuery {
            next_cursor: second_info.next_cursor.clone(),
            ..cursor_query(owner, 3)
        })
        .await
        .unwrap();
    assert_eq!(image_ids(&last), vec![7]);
    let PageInfo::Cursor(last_info) = last.pagination else {
        panic!("expected cursor metadata");
    };
    assert!(last_info.next_cursor.is_none());
    assert!(last_info.has_more_items, "a previous page still exists");

    let back = svc
        .list_images(&ListQuery {
            previous_cursor: second_info.previous_cursor,
            ..cursor_query(owner, 3)
        })
        .await
        .unwrap();
    // Backward pages read away from the anchor.
    assert_eq!(image_ids(&back), vec![3, 2, 1]);
}

#[tokio::test]
async fn album_and_date_filters() {
    let (gallery, owner) = seeded_gallery().await;
    let svc = gallery.service();

    let in_album = svc
        .list_images(&ListQuery {
            album_id: Some(1),
            ..ListQuery::for_owner(owner)
        })
        .await
        .unwrap();
    assert_eq!(image_ids(&in_album), vec![2, 4, 6]);

    let dated = svc
        .list_images(&ListQuery {
            from: NaiveDate::from_ymd_opt(2024, 1, 2),
            to: NaiveDate::from_ymd_opt(2024, 1, 4),
            ..ListQuery::for_owner(owner)
        })
        .await
        .unwrap();
    assert_eq!(image_ids(&dated), vec![2, 3, 4]);

    let stranger = svc
        .list_images(&ListQuery::for_owner(Uuid::new_v4()))
        .await
        .unwrap();
    assert!(stranger.items.is_empty());
}

#[tokio::test]
async fn albums_listing_and_membership_rejection() {
    let (gallery, owner) = seeded_gallery().await;
    let svc = gallery.service();

    let albums = svc.list_albums(&ListQuery::for_owner(owner)).await.unwrap();
    assert_eq!(albums.items.len(), 1);
    assert_eq!(albums.items[0].album_name, "Evens");

    let err = svc
        .list_albums(&ListQuery {
            album_id: Some(1),
            ..ListQuery::for_owner(owner)
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        gallery::domain::error::DomainError::InvalidRequest { .. }
    ));
}

#[tokio::test]
async fn local_client_maps_errors_to_contract() {
    let (gallery, owner) = seeded_gallery().await;
    let client = gallery.client();

    let err = client
        .list_images(ListQuery {
            from: NaiveDate::from_ymd_opt(2024, 1, 1),
            to: NaiveDate::from_ymd_opt(2025, 6, 1),
            ..ListQuery::for_owner(owner)
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<GalleryError>(),
        Some(GalleryError::Validation { .. })
    ));

    let err = client
        .list_images(ListQuery {
            next_cursor: Some("Mw".into()),
            previous_cursor: Some("Mg".into()),
            ..cursor_query(owner, 3)
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<GalleryError>(),
        Some(GalleryError::InvalidRequest { .. })
    ));

    let ok = client.list_albums(ListQuery::for_owner(owner)).await.unwrap();
    assert_eq!(ok.items[0].album_id, 1);
}

// ---------- REST ----------

async fn get(router: axum::Router, uri: &str, owner: Option<Uuid>) -> (StatusCode, Vec<u8>) {
    let mut req = Request::builder().method("GET").uri(uri);
    if let Some(owner) = owner {
        req = req.header("x-user-id", owner.to_string());
    }
    let resp = router
        .oneshot(req.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

#[tokio::test]
async fn rest_images_use_public_field_names() {
    let (gallery, owner) = seeded_gallery().await;

    let (status, body) = get(gallery.router(), "/images?page=2&limit=3", Some(owner)).await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let first = &json["images"][0];
    assert_eq!(first["imageId"], 4);
    assert_eq!(first["originalSize"]["width"], 1920);
    assert_eq!(first["userId"], owner.to_string());
    assert_eq!(json["images"][2]["faces"][0]["boundingBox"]["top"], 10.0);
    assert_eq!(json["pagination"]["totalPages"], 3);
    assert_eq!(json["pagination"]["currentPage"], 2);

    let page: ImagesPageDto = serde_json::from_slice(&body).unwrap();
    assert!(matches!(page.pagination, PaginationDto::Offset(_)));
}

#[tokio::test]
async fn rest_cursor_mode_accepts_prev_cursor_alias() {
    let (gallery, owner) = seeded_gallery().await;
    let router = gallery.router();

    let (status, body) = get(
        router.clone(),
        "/images?paginationType=cursor&limit=2",
        Some(owner),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let page: ImagesPageDto = serde_json::from_slice(&body).unwrap();
    let PaginationDto::Cursor(info) = page.pagination else {
        panic!("expected cursor pagination");
    };
    let next = info.next_cursor.unwrap();

    let (_, body) = get(
        router.clone(),
        &format!("/images?paginationType=cursor&limit=2&nextCursor={next}"),
        Some(owner),
    )
    .await;
    let page: ImagesPageDto = serde_json::from_slice(&body).unwrap();
    let ids: Vec<i64> = page.images.iter().map(|i| i.image_id).collect();
    assert_eq!(ids, vec![3, 4]);
    let PaginationDto::Cursor(info) = page.pagination else {
        panic!("expected cursor pagination");
    };

    let prev = info.previous_cursor.unwrap();
    let (_, body) = get(
        router,
        &format!("/images?paginationType=cursor&limit=2&prevCursor={prev}"),
        Some(owner),
    )
    .await;
    let page: ImagesPageDto = serde_json::from_slice(&body).unwrap();
    let ids: Vec<i64> = page.images.iter().map(|i| i.image_id).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[tokio::test]
async fn rest_albums_endpoint() {
    let (gallery, owner) = seeded_gallery().await;

    let (status, body) = get(gallery.router(), "/albums", Some(owner)).await;
    assert_eq!(status, StatusCode::OK);
    let page: AlbumsPageDto = serde_json::from_slice(&body).unwrap();
    assert_eq!(page.albums.len(), 1);
    assert_eq!(page.albums[0].album_name, "Evens");
    assert_eq!(page.albums[0].created_by, owner);

    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["albums"].is_array());
    assert!(json.get("items").is_none());
    assert!(json["pagination"].is_object());
}

#[tokio::test]
async fn rest_errors_are_problem_details() {
    let (gallery, owner) = seeded_gallery().await;
    let router = gallery.router();

    let cases = [
        ("/images?from=2024-02-01&to=2024-01-01", Some(owner), 422, "GALLERY_VALIDATION"),
        ("/albums?albumId=1", Some(owner), 400, "GALLERY_INVALID_REQUEST"),
        ("/images?limit=abc", Some(owner), 400, "GALLERY_INVALID_QUERY"),
        ("/images", None, 401, "GALLERY_UNAUTHENTICATED"),
    ];

    for (uri, caller, status, code) in cases {
        let req = Request::builder().method("GET").uri(uri);
        let req = match caller {
            Some(owner) => req.header("x-user-id", owner.to_string()),
            None => req,
        };
        let resp = router
            .clone()
            .oneshot(req.body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status().as_u16(), status, "{uri}");
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/problem+json"
        );
        let request_id = resp
            .headers()
            .get("x-request-id")
            .expect("request id propagated")
            .to_str()
            .unwrap()
            .to_owned();

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let problem: Problem = serde_json::from_slice(&body).unwrap();
        assert_eq!(problem.code, code, "{uri}");
        assert_eq!(problem.instance, uri.split('?').next().unwrap());
        assert_eq!(problem.trace_id.as_deref(), Some(request_id.as_str()));
    }
}

#[tokio::test]
async fn rest_rejects_malformed_caller_id() {
    let (gallery, _) = seeded_gallery().await;
    let resp = gallery
        .router()
        .oneshot(
            Request::builder()
                .uri("/images")
                .header("x-user-id", "not-a-uuid")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_endpoint() {
    let (gallery, _) = seeded_gallery().await;
    let (status, body) = get(gallery.router(), "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
}
