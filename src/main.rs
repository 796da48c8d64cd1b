use anyhow::{anyhow, Context};
use chrono::Local;
use log::{error, info};
use clap::Parser;
use quakefeed::commands::{report, Cli, ConfirmMode};
use quakefeed::config::IngestConfig;
use quakefeed::feed::FeedClient;
use quakefeed::ingest::{AutoConfirm, CommitGate, Confirm, ReconciliationEngine, StdinPrompt};
use quakefeed::storage;
use quakefeed::storage::repository::{FeedRepository, QuakeRepository};

fn init_logging(config: &IngestConfig) -> anyhow::Result<()> {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(log::LevelFilter::Warn)
        .filter_module("quakefeed", log::LevelFilter::Info)
        .filter_module("sqlx", log::LevelFilter::Error)
        .filter_module("sea_orm", log::LevelFilter::Error)
        .parse_default_env();

    if let Some(dir) = &config.log_dir {
        std::fs::create_dir_all(dir)?;
        let ts = Local::now().format("%Y%m%d-%H%M%S").to_string();
        let log_file = std::fs::File::create(dir.join(format!("quakefeed-{}.log", ts)))?;
        builder.target(env_logger::Target::Pipe(Box::new(log_file)));
    }

    builder.init();
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = IngestConfig::from_env()?;
    init_logging(&config)?;

    let cli = Cli::parse();
    let mode = cli.confirm_mode();
    let (level, period) = (cli.level, cli.period);

    let db = storage::establish_connection(&config.database_url)
        .await
        .with_context(|| format!("cannot open store at {}", config.database_url))?;

    let client = FeedClient::new(config.feed_base_url.clone())?;
    let fetch = client.fetch(&level, &period);
    let feed = match config.fetch_timeout {
        Some(limit) => tokio::time::timeout(limit, fetch)
            .await
            .map_err(|_| anyhow!("fetching {}_{} timed out after {:?}", level, period, limit))??,
        None => fetch.await?,
    };
    info!(
        "{} \"{}\" api={} declared={}",
        feed, feed.title, feed.api_version, feed.event_count
    );

    let gate = CommitGate::new(&db, ReconciliationEngine::new(config.coercion));
    let mut confirm: Box<dyn Confirm> = match mode {
        ConfirmMode::Prompt => Box::new(StdinPrompt),
        ConfirmMode::Yes => Box::new(AutoConfirm(true)),
        ConfirmMode::DryRun => Box::new(AutoConfirm(false)),
    };

    let outcome = gate.run(&feed, confirm.as_mut()).await;
    match (QuakeRepository::count(&db).await, FeedRepository::count(&db).await) {
        (Ok(quakes), Ok(feeds)) => info!("store holds {} quakes from {} snapshots", quakes, feeds),
        (Err(e), _) | (_, Err(e)) => error!("counting stored rows: {}", e),
    }
    if let Err(e) = db.close().await {
        error!("closing store: {}", e);
    }
    let outcome = outcome?;

    println!("{}", report::summary(&outcome));
    Ok(())
}
