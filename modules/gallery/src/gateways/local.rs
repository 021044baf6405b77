use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::GalleryApi,
    error::GalleryError,
    model::{Album, Image, ListQuery},
};
use crate::domain::{error::DomainError, service::Service};
use paging_core::Page;

/// Local implementation of the GalleryApi trait that delegates to the domain service
pub struct GalleryLocalClient {
    service: Arc<Service>,
}

impl GalleryLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl GalleryApi for GalleryLocalClient {
    async fn list_images(&self, query: ListQuery) -> anyhow::Result<Page<Image>> {
        self.service
            .list_images(&query)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn list_albums(&self, query: ListQuery) -> anyhow::Result<Page<Album>> {
        self.service
            .list_albums(&query)
            .await
            .map_err(map_domain_error_to_anyhow)
    }
}

/// Map domain errors to contract errors wrapped in anyhow
fn map_domain_error_to_anyhow(domain_error: DomainError) -> anyhow::Error {
    let contract_error = match domain_error {
        DomainError::InvalidRequest { message } => GalleryError::invalid_request(message),
        DomainError::Validation { message } => GalleryError::validation(message),
        DomainError::Timeout { .. } => GalleryError::Unavailable,
        DomainError::Database { .. } => GalleryError::Internal,
    };

    anyhow::Error::new(contract_error)
}
