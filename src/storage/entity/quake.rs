use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quakes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    // 位置
    #[sea_orm(nullable)]
    pub longitude: Option<f64>,
    #[sea_orm(nullable)]
    pub latitude: Option<f64>,
    #[sea_orm(nullable)]
    pub depth: Option<f64>,

    #[sea_orm(nullable)]
    pub mag: Option<f64>,
    #[sea_orm(nullable)]
    pub mag_type: Option<String>,
    #[sea_orm(nullable)]
    pub event_type: Option<String>,
    #[sea_orm(nullable)]
    pub sig: Option<i32>,
    #[sea_orm(nullable)]
    pub alert: Option<String>,
    pub status: String,
    #[sea_orm(nullable)]
    pub tsunami: Option<bool>,
    #[sea_orm(nullable)]
    pub felt: Option<i32>,
    #[sea_orm(nullable)]
    pub cdi: Option<f64>,
    #[sea_orm(nullable)]
    pub mmi: Option<f64>,

    #[sea_orm(nullable)]
    pub nst: Option<i32>,
    #[sea_orm(nullable)]
    pub dmin: Option<f64>,
    #[sea_orm(nullable)]
    pub rms: Option<f64>,
    #[sea_orm(nullable)]
    pub gap: Option<f64>,
    pub net: String,
    pub code: String,
    pub ids: String,
    pub sources: String,
    pub types: String,

    // epoch 毫秒
    pub time_ms: i64,
    pub updated_ms: i64,
    pub tz_minutes: i32,

    pub place: String,
    pub title: String,
    pub url: String,
    pub detail: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::feed_quake::Entity")]
    FeedQuake,
}

impl Related<super::feed_quake::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeedQuake.def()
    }
}

impl Related<super::feed::Entity> for Entity {
    fn to() -> RelationDef {
        super::feed_quake::Relation::Feed.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::feed_quake::Relation::Quake.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
