#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use gallery::config::GalleryConfig;
use gallery::infra::storage::seed;
use gallery::Gallery;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use uuid::Uuid;

pub const IMAGES: i64 = 7;

pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
}

/// Fresh single-connection in-memory database.
pub async fn connect() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).sqlx_logging(false);
    Database::connect(opts)
        .await
        .expect("Failed to connect to test database")
}

/// Gallery over a bootstrapped database holding the demo data set for one owner:
/// images 1..=7 one day apart from 2024-01-01, faces on 3 and 6, album 1
/// holding 2, 4 and 6.
pub async fn seeded_gallery() -> (Gallery, Uuid) {
    let db = connect().await;
    let owner = Uuid::new_v4();
    let config = GalleryConfig {
        bootstrap_schema: true,
        ..GalleryConfig::default()
    };
    let gallery = Gallery::init(db.clone(), config)
        .await
        .expect("gallery init");
    seed::demo(&db, owner, IMAGES, start())
        .await
        .expect("seed demo data");
    (gallery, owner)
}
