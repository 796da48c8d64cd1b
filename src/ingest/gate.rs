use super::model::{GateOutcome, ReconciliationResult};
use super::reconcile::ReconciliationEngine;
use crate::error::Result;
use crate::feed::Feed;
use async_trait::async_trait;
use log::{info, warn};
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Decides whether a staged pass becomes durable.
#[async_trait]
pub trait Confirm: Send {
    async fn confirm(&mut self, result: &ReconciliationResult) -> Result<bool>;
}

/// Fixed answer, for `--yes` / `--dry-run` and tests.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

#[async_trait]
impl Confirm for AutoConfirm {
    async fn confirm(&mut self, _result: &ReconciliationResult) -> Result<bool> {
        Ok(self.0)
    }
}

/// Asks the operator on stdin. Anything but an answer starting with `y`
/// declines, end of input included.
#[derive(Debug, Default)]
pub struct StdinPrompt;

pub const PROMPT: &str = "Commit changes to database? [y/N]: ";

pub fn is_yes(answer: &str) -> bool {
    answer.trim_start().to_ascii_lowercase().starts_with('y')
}

/// Read one answer line; end of input counts as "no".
pub async fn read_answer<R: AsyncBufRead + Unpin>(reader: &mut R) -> Result<bool> {
    let mut answer = String::new();
    let read = reader.read_line(&mut answer).await?;
    Ok(read > 0 && is_yes(&answer))
}

#[async_trait]
impl Confirm for StdinPrompt {
    async fn confirm(&mut self, _result: &ReconciliationResult) -> Result<bool> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(PROMPT.as_bytes()).await?;
        stdout.flush().await?;

        read_answer(&mut BufReader::new(tokio::io::stdin())).await
    }
}

/// Runs a reconciliation pass inside one transaction and only commits it
/// once the `Confirm` step agrees. Any error or a veto rolls everything back.
pub struct CommitGate<'a> {
    db: &'a DatabaseConnection,
    engine: ReconciliationEngine,
}

impl<'a> CommitGate<'a> {
    pub fn new(db: &'a DatabaseConnection, engine: ReconciliationEngine) -> Self {
        Self { db, engine }
    }

    pub async fn run(&self, feed: &Feed, confirm: &mut dyn Confirm) -> Result<GateOutcome> {
        let txn = self.db.begin().await?;

        let result = match self.engine.reconcile(feed, &txn).await {
            Ok(result) => result,
            Err(e) => {
                discard(txn).await;
                return Err(e);
            }
        };

        let approved = match confirm.confirm(&result).await {
            Ok(approved) => approved,
            Err(e) => {
                discard(txn).await;
                return Err(e);
            }
        };

        if approved {
            txn.commit().await?;
            info!("{} committed", feed);
            Ok(GateOutcome::Committed(result))
        } else {
            txn.rollback().await?;
            info!("{} vetoed, staged changes discarded", feed);
            Ok(GateOutcome::Vetoed(result))
        }
    }
}

async fn discard(txn: DatabaseTransaction) {
    if let Err(e) = txn.rollback().await {
        warn!("rollback failed: {}", e);
    }
}
