use crate::decode::timestamp::{from_epoch_ms, to_epoch_ms};
use crate::decode::Event;
use crate::storage::entity::quake::{
    ActiveModel as QuakeActiveModel, Entity as Quake, Model as QuakeModel,
};
use chrono::Duration;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, PaginatorTrait, Set,
};

pub struct QuakeRepository;

impl From<QuakeModel> for Event {
    fn from(model: QuakeModel) -> Self {
        Self {
            id: model.id,
            longitude: model.longitude,
            latitude: model.latitude,
            depth: model.depth,
            magnitude: model.mag,
            magnitude_type: model.mag_type,
            event_type: model.event_type,
            significance: model.sig,
            alert_level: model.alert,
            status: model.status,
            tsunami: model.tsunami,
            felt: model.felt,
            cdi: model.cdi,
            mmi: model.mmi,
            station_count: model.nst,
            min_distance: model.dmin,
            rms: model.rms,
            azimuthal_gap: model.gap,
            network: model.net,
            code: model.code,
            contributing_ids: model.ids,
            contributing_sources: model.sources,
            product_types: model.types,
            occurred_at: from_epoch_ms(model.time_ms),
            updated_at: from_epoch_ms(model.updated_ms),
            timezone_offset: Duration::minutes(i64::from(model.tz_minutes)),
            place: model.place,
            title: model.title,
            url: model.url,
            detail_url: model.detail,
        }
    }
}

/// Copy every column except the key from `e` into `am`.
fn assign(am: &mut QuakeActiveModel, e: &Event) {
    am.longitude = Set(e.longitude);
    am.latitude = Set(e.latitude);
    am.depth = Set(e.depth);
    am.mag = Set(e.magnitude);
    am.mag_type = Set(e.magnitude_type.clone());
    am.event_type = Set(e.event_type.clone());
    am.sig = Set(e.significance);
    am.alert = Set(e.alert_level.clone());
    am.status = Set(e.status.clone());
    am.tsunami = Set(e.tsunami);
    am.felt = Set(e.felt);
    am.cdi = Set(e.cdi);
    am.mmi = Set(e.mmi);
    am.nst = Set(e.station_count);
    am.dmin = Set(e.min_distance);
    am.rms = Set(e.rms);
    am.gap = Set(e.azimuthal_gap);
    am.net = Set(e.network.clone());
    am.code = Set(e.code.clone());
    am.ids = Set(e.contributing_ids.clone());
    am.sources = Set(e.contributing_sources.clone());
    am.types = Set(e.product_types.clone());
    am.time_ms = Set(to_epoch_ms(&e.occurred_at));
    am.updated_ms = Set(to_epoch_ms(&e.updated_at));
    am.tz_minutes = Set(e.timezone_offset.num_minutes() as i32);
    am.place = Set(e.place.clone());
    am.title = Set(e.title.clone());
    am.url = Set(e.url.clone());
    am.detail = Set(e.detail_url.clone());
}

impl QuakeRepository {
    pub async fn find<C: ConnectionTrait>(
        db: &C,
        id: &str,
    ) -> Result<Option<QuakeModel>, sea_orm::DbErr> {
        Quake::find_by_id(id.to_string()).one(db).await
    }

    pub async fn insert<C: ConnectionTrait>(db: &C, event: &Event) -> Result<(), sea_orm::DbErr> {
        let mut am = QuakeActiveModel {
            id: Set(event.id.clone()),
            ..Default::default()
        };
        assign(&mut am, event);
        Quake::insert(am).exec_without_returning(db).await?;
        Ok(())
    }

    /// Full-row overwrite of an existing quake. The key never changes.
    pub async fn replace<C: ConnectionTrait>(
        db: &C,
        stored: QuakeModel,
        event: &Event,
    ) -> Result<(), sea_orm::DbErr> {
        let mut am: QuakeActiveModel = stored.into();
        assign(&mut am, event);
        am.update(db).await?;
        Ok(())
    }

    pub async fn count<C: ConnectionTrait>(db: &C) -> Result<u64, sea_orm::DbErr> {
        Quake::find().count(db).await
    }
}

#[cfg(test)]
impl QuakeRepository {
    pub async fn load_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Event>, sea_orm::DbErr> {
        use crate::storage::entity::quake::Column;
        use sea_orm::QueryOrder;

        let models = Quake::find()
            .order_by_asc(Column::Id)
            .all(db)
            .await?;
        Ok(models.into_iter().map(Event::from).collect())
    }
}
