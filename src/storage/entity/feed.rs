use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "feeds")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub level: String,  // significant / 4.5 / 2.5 / 1.0 / all
    pub period: String, // hour / day / week / month
    pub source_url: String,
    pub title: String,
    pub api_version: String,
    pub event_count: i64,
    pub generated_ms: i64,
    pub fetched_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::bounding_box::Entity")]
    BoundingBox,
    #[sea_orm(has_many = "super::feed_quake::Entity")]
    FeedQuake,
}

impl Related<super::bounding_box::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BoundingBox.def()
    }
}

impl Related<super::feed_quake::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeedQuake.def()
    }
}

impl Related<super::quake::Entity> for Entity {
    fn to() -> RelationDef {
        super::feed_quake::Relation::Quake.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::feed_quake::Relation::Feed.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
