//! Insert helpers for demo data and tests.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, Set};
use uuid::Uuid;

use crate::contract::model::BoundingBox;
use crate::infra::storage::entity::{album_images, albums, faces, images};
use crate::infra::storage::mapper::bounding_box_json;

/// Data for inserting a new image row.
pub struct NewImage {
    pub image_id: i64,
    pub uploaded_by: Uuid,
    pub upload_date: DateTime<Utc>,
    pub image_path: String,
    pub original_width: i32,
    pub original_height: i32,
}

impl NewImage {
    pub fn new(image_id: i64, uploaded_by: Uuid, upload_date: DateTime<Utc>) -> Self {
        Self {
            image_id,
            uploaded_by,
            upload_date,
            image_path: format!("uploads/{uploaded_by}/{image_id}.jpg"),
            original_width: 1920,
            original_height: 1080,
        }
    }
}

pub async fn insert_image<C: ConnectionTrait>(
    db: &C,
    new: NewImage,
) -> Result<images::Model, DbErr> {
    images::ActiveModel {
        image_id: Set(new.image_id),
        image_path: Set(new.image_path),
        upload_date: Set(new.upload_date),
        update_date: Set(None),
        original_width: Set(new.original_width),
        original_height: Set(new.original_height),
        uploaded_by: Set(new.uploaded_by),
    }
    .insert(db)
    .await
}

pub async fn insert_face<C: ConnectionTrait>(
    db: &C,
    face_id: i64,
    image_id: i64,
    bounding_box: BoundingBox,
) -> Result<faces::Model, DbErr> {
    faces::ActiveModel {
        face_id: Set(face_id),
        image_id: Set(image_id),
        bounding_box: Set(bounding_box_json(&bounding_box)),
    }
    .insert(db)
    .await
}

pub async fn insert_album<C: ConnectionTrait>(
    db: &C,
    album_id: i64,
    created_by: Uuid,
    name: &str,
    creation_date: DateTime<Utc>,
) -> Result<albums::Model, DbErr> {
    albums::ActiveModel {
        album_id: Set(album_id),
        album_name: Set(name.to_string()),
        created_by: Set(created_by),
        creation_date: Set(creation_date),
        shared_link: Set(None),
    }
    .insert(db)
    .await
}

pub async fn link<C: ConnectionTrait>(db: &C, album_id: i64, image_id: i64) -> Result<(), DbErr> {
    album_images::ActiveModel {
        album_id: Set(album_id),
        image_id: Set(image_id),
    }
    .insert(db)
    .await?;
    Ok(())
}

/// `images` photos one day apart starting at `start`, every third one with a
/// face, plus one album holding the even-numbered photos.
pub async fn demo<C: ConnectionTrait>(
    db: &C,
    owner: Uuid,
    images: i64,
    start: DateTime<Utc>,
) -> Result<(), DbErr> {
    for id in 1..=images {
        insert_image(db, NewImage::new(id, owner, start + Duration::days(id - 1))).await?;
        if id % 3 == 0 {
            let face = BoundingBox {
                top: 10.0,
                left: 20.0,
                right: 120.0,
                bottom: 140.0,
            };
            insert_face(db, id, id, face).await?;
        }
    }

    insert_album(db, 1, owner, "Evens", start).await?;
    for id in (2..=images).step_by(2) {
        link(db, 1, id).await?;
    }
    Ok(())
}
