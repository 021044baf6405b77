use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "images")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub image_id: i64,
    pub image_path: String,
    pub upload_date: DateTimeUtc,
    pub update_date: Option<DateTimeUtc>,
    pub original_width: i32,
    pub original_height: i32,
    pub uploaded_by: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::faces::Entity")]
    Faces,
    #[sea_orm(has_many = "super::album_images::Entity")]
    AlbumImages,
}

impl Related<super::faces::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Faces.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
