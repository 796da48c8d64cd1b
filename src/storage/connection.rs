use crate::storage::entity::{bounding_box, feed, feed_quake, quake};
use log::info;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, DbErr, Schema,
    Statement,
};
use std::time::Duration;

/// Pool settings for a file-backed store. The ingester is the only writer, so
/// the pool is small.
pub fn connect_options(db_url: &str) -> ConnectOptions {
    let mut opt = ConnectOptions::new(db_url.to_owned());
    opt.max_connections(4)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);
    opt
}

pub async fn establish_connection(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    open(connect_options(db_url)).await
}

/// Connect and make sure the schema exists.
pub async fn open(opt: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(opt).await?;

    // 启用 WAL 模式
    db.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        "PRAGMA journal_mode=WAL;".to_string(),
    ))
    .await?;
    db.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        "PRAGMA foreign_keys=ON;".to_string(),
    ))
    .await?;

    create_schema(&db).await?;

    info!("Database connection established with WAL mode and tables initialized.");

    Ok(db)
}

async fn create_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    db.execute(builder.build(schema.create_table_from_entity(quake::Entity).if_not_exists()))
        .await?;
    db.execute(builder.build(schema.create_table_from_entity(feed::Entity).if_not_exists()))
        .await?;
    db.execute(
        builder.build(
            schema
                .create_table_from_entity(bounding_box::Entity)
                .if_not_exists(),
        ),
    )
    .await?;
    db.execute(
        builder.build(
            schema
                .create_table_from_entity(feed_quake::Entity)
                .if_not_exists(),
        ),
    )
    .await?;

    // 同一快照只存一份；同一 feed 内每个事件只关联一次
    for sql in [
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_feeds_snapshot ON feeds(source_url, generated_ms);",
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_feed_quakes_unique ON feed_quakes(feed_id, quake_id);",
        "CREATE INDEX IF NOT EXISTS idx_feed_quakes_quake ON feed_quakes(quake_id);",
    ] {
        db.execute(Statement::from_string(builder, sql.to_string()))
            .await?;
    }

    Ok(())
}
