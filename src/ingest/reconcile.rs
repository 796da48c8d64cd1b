use super::model::ReconciliationResult;
use crate::decode::{decode_event, CoercionPolicy};
use crate::error::Result;
use crate::feed::Feed;
use crate::storage::repository::{FeedRepository, QuakeRepository};
use log::{debug, info, warn};
use sea_orm::{ConnectionTrait, DatabaseTransaction, TransactionTrait};

const PROGRESS_EVERY: usize = 100;

/// Merges a feed snapshot into the store.
///
/// A pass runs in its own transaction (a savepoint when handed one already),
/// so a structural fault leaves nothing of the batch behind.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconciliationEngine {
    policy: CoercionPolicy,
}

impl ReconciliationEngine {
    pub fn new(policy: CoercionPolicy) -> Self {
        Self { policy }
    }

    pub async fn reconcile<C>(&self, feed: &Feed, db: &C) -> Result<ReconciliationResult>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let txn = db.begin().await?;
        match self.apply(feed, &txn).await {
            Ok(result) => {
                txn.commit().await?;
                Ok(result)
            }
            Err(e) => {
                if let Err(re) = txn.rollback().await {
                    warn!("{} rollback failed: {}", feed, re);
                }
                Err(e)
            }
        }
    }

    async fn apply(&self, feed: &Feed, db: &DatabaseTransaction) -> Result<ReconciliationResult> {
        let bbox = feed.bounding_box()?;
        let (feed_id, created) = FeedRepository::store_snapshot(db, feed, &bbox).await?;
        debug!(
            "{} stored as feed #{} (new={}) bbox={:?}",
            feed, feed_id, created, bbox
        );

        let mut result = ReconciliationResult::default();
        for (idx, raw) in feed.events().enumerate() {
            let event = match decode_event(raw, self.policy) {
                Ok(event) => event,
                Err(e) if e.is_structural() => {
                    warn!("{} record #{} is structurally broken: {}", feed, idx, e);
                    return Err(e.into());
                }
                Err(e) => {
                    warn!(
                        "{} skipping record #{} ({}): {}",
                        feed,
                        idx,
                        raw.get("id").map(|v| v.to_string()).unwrap_or_default(),
                        e
                    );
                    result.skipped += 1;
                    continue;
                }
            };

            match QuakeRepository::find(db, &event.id).await? {
                None => {
                    QuakeRepository::insert(db, &event).await?;
                    result.added += 1;
                }
                Some(stored) => {
                    QuakeRepository::replace(db, stored, &event).await?;
                    result.updated += 1;
                }
            }
            FeedRepository::link_quake(db, feed_id, &event.id).await?;

            if (idx + 1) % PROGRESS_EVERY == 0 {
                info!("{} progress {}/{}", feed, idx + 1, feed.event_count);
            }
        }

        let iterated = result.processed() as u64;
        if iterated != feed.event_count {
            warn!(
                "{} declared {} events but carried {}",
                feed, feed.event_count, iterated
            );
        }
        info!(
            "{} reconciled: added={} updated={} skipped={}",
            feed, result.added, result.updated, result.skipped
        );
        Ok(result)
    }
}
