use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "feed_quakes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub feed_id: i32,     // 指向 feeds.id
    pub quake_id: String, // 指向 quakes.id
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::feed::Entity",
        from = "Column::FeedId",
        to = "super::feed::Column::Id",
        on_delete = "Cascade"
    )]
    Feed,
    #[sea_orm(
        belongs_to = "super::quake::Entity",
        from = "Column::QuakeId",
        to = "super::quake::Column::Id"
    )]
    Quake,
}

impl Related<super::feed::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Feed.def()
    }
}

impl Related<super::quake::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quake.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
