use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "albums")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub album_id: i64,
    pub album_name: String,
    pub created_by: Uuid,
    pub creation_date: DateTimeUtc,
    pub shared_link: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::album_images::Entity")]
    AlbumImages,
}

impl ActiveModelBehavior for ActiveModel {}
