use std::sync::Arc;

use paging_core::{Collection, Page, Paginator, PagingConfig, RecordSource};
use tracing::{debug, error, instrument};

use crate::contract::model::{Album, Image, ListQuery};
use crate::domain::error::DomainError;

pub type ImageStore = Arc<dyn RecordSource<Record = Image>>;
pub type AlbumStore = Arc<dyn RecordSource<Record = Album>>;

/// Read-side gallery service: every listing goes through the shared paginator.
/// Depends only on the `RecordSource` port, not on infra types.
#[derive(Clone)]
pub struct Service {
    paginator: Paginator,
    images: ImageStore,
    albums: AlbumStore,
}

impl Service {
    pub fn new(images: ImageStore, albums: AlbumStore, config: &PagingConfig) -> Self {
        Self {
            paginator: Paginator::new(config),
            images,
            albums,
        }
    }

    #[instrument(
        name = "gallery.service.list_images",
        skip(self, query),
        fields(owner_id = %query.owner_id, mode = ?query.mode)
    )]
    pub async fn list_images(&self, query: &ListQuery) -> Result<Page<Image>, DomainError> {
        let page = self
            .paginator
            .paginate(
                Collection::Images.name(),
                &query.to_page_request(),
                self.images.as_ref(),
            )
            .await
            .map_err(report)?;

        debug!(returned = page.items.len(), "listed images");
        Ok(page)
    }

    #[instrument(
        name = "gallery.service.list_albums",
        skip(self, query),
        fields(owner_id = %query.owner_id, mode = ?query.mode)
    )]
    pub async fn list_albums(&self, query: &ListQuery) -> Result<Page<Album>, DomainError> {
        let page = self
            .paginator
            .paginate(
                Collection::Albums.name(),
                &query.to_page_request(),
                self.albums.as_ref(),
            )
            .await
            .map_err(report)?;

        debug!(returned = page.items.len(), "listed albums");
        Ok(page)
    }
}

/// Store failures are logged here; caller faults are not.
fn report(e: paging_core::Error) -> DomainError {
    match &e {
        paging_core::Error::Store(_) | paging_core::Error::Timeout { .. } => {
            error!(error = %e, "gallery listing failed");
        }
        _ => debug!(error = %e, "rejected listing request"),
    }
    e.into()
}

