use std::sync::Arc;

use anyhow::Context;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::api::rest::routes;
use crate::config::GalleryConfig;
use crate::contract::client::GalleryApi;
use crate::domain::service::Service;
use crate::gateways::local::GalleryLocalClient;
use crate::infra::storage::{schema, AlbumSource, ImageSource};

/// Wired gallery module: service, in-process client and REST router share one
/// database connection.
#[derive(Clone)]
pub struct Gallery {
    service: Arc<Service>,
    config: GalleryConfig,
}

impl Gallery {
    pub async fn init(db: DatabaseConnection, config: GalleryConfig) -> anyhow::Result<Self> {
        if config.bootstrap_schema {
            schema::bootstrap(&db)
                .await
                .context("gallery schema bootstrap failed")?;
        }

        let images = Arc::new(ImageSource::new(db.clone()));
        let albums = Arc::new(AlbumSource::new(db));
        let service = Arc::new(Service::new(images, albums, &config.paging));

        info!(
            default_limit = config.paging.default_limit,
            max_limit = config.paging.max_limit,
            cursor_policy = ?config.paging.cursor_policy,
            "gallery module initialized"
        );
        Ok(Self { service, config })
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    pub fn client(&self) -> Arc<dyn GalleryApi> {
        Arc::new(GalleryLocalClient::new(self.service.clone()))
    }

    pub fn router(&self) -> axum::Router {
        routes::router(self.service.clone())
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }
}
