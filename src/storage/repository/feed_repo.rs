use crate::decode::timestamp::to_epoch_ms;
use crate::decode::BoundingBox;
use crate::feed::Feed;
use crate::storage::entity::bounding_box::ActiveModel as BoundingBoxActiveModel;
use crate::storage::entity::feed::{
    ActiveModel as FeedActiveModel, Column as FeedColumn, Entity as FeedEntity,
    Model as FeedModel,
};
use crate::storage::entity::feed_quake::{
    ActiveModel as FeedQuakeActiveModel, Column as FeedQuakeColumn, Entity as FeedQuake,
};
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, Set,
};

pub struct FeedRepository;

impl FeedRepository {
    pub async fn find_snapshot<C: ConnectionTrait>(
        db: &C,
        source_url: &str,
        generated_ms: i64,
    ) -> Result<Option<FeedModel>, sea_orm::DbErr> {
        FeedEntity::find()
            .filter(FeedColumn::SourceUrl.eq(source_url.to_string()))
            .filter(FeedColumn::GeneratedMs.eq(generated_ms))
            .one(db)
            .await
    }

    /// Store the snapshot together with its bounding box, or return the row
    /// already stored for the same `(source_url, generated)` pair.
    ///
    /// Returns the feed id and whether a new row was written.
    pub async fn store_snapshot<C: ConnectionTrait>(
        db: &C,
        feed: &Feed,
        bbox: &BoundingBox,
    ) -> Result<(i32, bool), sea_orm::DbErr> {
        let generated_ms = to_epoch_ms(&feed.generated_at);
        if let Some(existing) = Self::find_snapshot(db, &feed.source_url, generated_ms).await? {
            return Ok((existing.id, false));
        }

        let stored = FeedActiveModel {
            id: NotSet,
            level: Set(feed.level.to_string()),
            period: Set(feed.period.to_string()),
            source_url: Set(feed.source_url.clone()),
            title: Set(feed.title.clone()),
            api_version: Set(feed.api_version.clone()),
            event_count: Set(feed.event_count as i64),
            generated_ms: Set(generated_ms),
            fetched_at: Set(Utc::now().timestamp()),
        }
        .insert(db)
        .await?;

        BoundingBoxActiveModel {
            id: NotSet,
            feed_id: Set(stored.id),
            min_longitude: Set(bbox.min_longitude),
            max_longitude: Set(bbox.max_longitude),
            min_latitude: Set(bbox.min_latitude),
            max_latitude: Set(bbox.max_latitude),
            min_depth: Set(bbox.min_depth),
            max_depth: Set(bbox.max_depth),
        }
        .insert(db)
        .await?;

        Ok((stored.id, true))
    }

    /// Associate a quake with a feed; a repeated pair is a no-op.
    pub async fn link_quake<C: ConnectionTrait>(
        db: &C,
        feed_id: i32,
        quake_id: &str,
    ) -> Result<bool, sea_orm::DbErr> {
        let am = FeedQuakeActiveModel {
            id: NotSet,
            feed_id: Set(feed_id),
            quake_id: Set(quake_id.to_string()),
        };
        let rows = FeedQuake::insert(am)
            .on_conflict(
                OnConflict::columns([FeedQuakeColumn::FeedId, FeedQuakeColumn::QuakeId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
        Ok(rows > 0)
    }

    pub async fn count<C: ConnectionTrait>(db: &C) -> Result<u64, sea_orm::DbErr> {
        FeedEntity::find().count(db).await
    }
}

#[cfg(test)]
impl FeedRepository {
    pub async fn bounding_box<C: ConnectionTrait>(
        db: &C,
        feed_id: i32,
    ) -> Result<Option<BoundingBox>, sea_orm::DbErr> {
        use crate::storage::entity::bounding_box::{Column, Entity};

        let row = Entity::find()
            .filter(Column::FeedId.eq(feed_id))
            .one(db)
            .await?;
        Ok(row.map(|b| BoundingBox {
            min_longitude: b.min_longitude,
            max_longitude: b.max_longitude,
            min_latitude: b.min_latitude,
            max_latitude: b.max_latitude,
            min_depth: b.min_depth,
            max_depth: b.max_depth,
        }))
    }

    pub async fn quake_ids<C: ConnectionTrait>(
        db: &C,
        feed_id: i32,
    ) -> Result<Vec<String>, sea_orm::DbErr> {
        use sea_orm::QueryOrder;

        let rows = FeedQuake::find()
            .filter(FeedQuakeColumn::FeedId.eq(feed_id))
            .order_by_asc(FeedQuakeColumn::Id)
            .all(db)
            .await?;
        Ok(rows.into_iter().map(|r| r.quake_id).collect())
    }

    pub async fn count_links<C: ConnectionTrait>(db: &C) -> Result<u64, sea_orm::DbErr> {
        FeedQuake::find().count(db).await
    }
}
