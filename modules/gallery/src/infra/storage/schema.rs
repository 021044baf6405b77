//! Table bootstrap for SQLite and development databases.

use anyhow::Context;
use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, EntityName, EntityTrait, Schema};
use tracing::info;

use crate::infra::storage::entity::{album_images, albums, faces, images};

async fn create_table<C, E>(conn: &C, schema: &Schema, entity: E) -> anyhow::Result<()>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let backend = conn.get_database_backend();
    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();
    conn.execute(backend.build(&stmt))
        .await
        .with_context(|| format!("creating table {} failed", entity.table_name()))?;
    Ok(())
}

/// Create every gallery table and lookup index that does not exist yet.
pub async fn bootstrap<C: ConnectionTrait>(conn: &C) -> anyhow::Result<()> {
    let backend = conn.get_database_backend();
    let schema = Schema::new(backend);

    // Referenced tables first.
    create_table(conn, &schema, images::Entity).await?;
    create_table(conn, &schema, albums::Entity).await?;
    create_table(conn, &schema, faces::Entity).await?;
    create_table(conn, &schema, album_images::Entity).await?;

    let indexes = [
        Index::create()
            .if_not_exists()
            .name("idx_images_uploaded_by")
            .table(images::Entity)
            .col(images::Column::UploadedBy)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("idx_faces_image_id")
            .table(faces::Entity)
            .col(faces::Column::ImageId)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("idx_album_images_image_id")
            .table(album_images::Entity)
            .col(album_images::Column::ImageId)
            .to_owned(),
    ];
    for idx in &indexes {
        conn.execute(backend.build(idx))
            .await
            .context("creating index failed")?;
    }

    info!("gallery schema ready");
    Ok(())
}
