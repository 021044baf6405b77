use anyhow::Context;
use serde::Deserialize;

use crate::contract::model::{Album, BoundingBox, Face, Image};
use crate::infra::storage::entity::{albums, faces, images};

/// Stored JSON shape of `faces.bounding_box`.
#[derive(Deserialize)]
struct StoredBox {
    top: f64,
    left: f64,
    right: f64,
    bottom: f64,
}

impl TryFrom<faces::Model> for Face {
    type Error = anyhow::Error;

    fn try_from(m: faces::Model) -> anyhow::Result<Self> {
        let b: StoredBox = serde_json::from_value(m.bounding_box)
            .with_context(|| format!("face {} has a malformed bounding_box", m.face_id))?;
        Ok(Face {
            face_id: m.face_id,
            bounding_box: BoundingBox {
                top: b.top,
                left: b.left,
                right: b.right,
                bottom: b.bottom,
            },
        })
    }
}

pub fn bounding_box_json(b: &BoundingBox) -> serde_json::Value {
    serde_json::json!({
        "top": b.top,
        "left": b.left,
        "right": b.right,
        "bottom": b.bottom,
    })
}

pub fn image_from(m: images::Model, faces: Vec<Face>) -> Image {
    Image {
        image_id: m.image_id,
        image_path: m.image_path,
        upload_date: m.upload_date,
        update_date: m.update_date,
        original_width: m.original_width,
        original_height: m.original_height,
        uploaded_by: m.uploaded_by,
        faces,
    }
}

impl From<albums::Model> for Album {
    fn from(m: albums::Model) -> Self {
        Self {
            album_id: m.album_id,
            album_name: m.album_name,
            created_by: m.created_by,
            creation_date: m.creation_date,
            shared_link: m.shared_link,
        }
    }
}
