//! Vibe Player - record and resume listening progress from the command line
mod settings;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use settings::PlayerConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vibe_core::{
    ConnectivityFlag, ContentItemId, LocalWrite, OwnerId, ProgressRecord, RecordOutcome,
    RemoteWrite,
};
use vibe_progress::Reconciler;
use vibe_server_client::{HealthProbe, RemoteProgressStore, ServerConfig, VibeServerClient};
use vibe_storage::LocalProgressStore;

#[derive(Parser)]
#[command(name = "vibe-player")]
#[command(about = "Record and resume listening progress", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        env = "VIBE_PLAYER_CONFIG",
        default_value = "player.toml"
    )]
    config: PathBuf,

    /// Owner whose progress to use (overrides the config file)
    #[arg(long, global = true, env = "VIBE_PLAYER_OWNER")]
    owner: Option<String>,

    /// Progress server URL (overrides the config file)
    #[arg(long, global = true, env = "VIBE_PLAYER_SERVER")]
    server: Option<String>,

    /// Skip the health check and keep writes on this device; reads still
    /// ask the server
    #[arg(long, global = true)]
    offline: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save the position reached in a content item
    Record {
        /// Content item id
        item: String,
        /// Part (chapter) index
        part: u32,
        /// Position within the part, in seconds
        position: f64,
        /// Duration of the part, in seconds
        #[arg(short, long, default_value_t = 0.0)]
        duration: f64,
    },
    /// Show where playback of a content item would resume
    Resume {
        /// Content item id
        item: String,
    },
    /// List items with progress, most recent first
    History,
    /// Check whether the progress server is reachable
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vibe_player=info,vibe_progress=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = PlayerConfig::load_from(&cli.config)?;
    if let Some(owner) = &cli.owner {
        config.owner_id.clone_from(owner);
    }
    if let Some(server) = &cli.server {
        config.server.url.clone_from(server);
    }
    config.validate()?;

    let client = VibeServerClient::new(
        ServerConfig::new(&config.server.url).with_timeout(config.remote_timeout()),
    )
    .context("Invalid progress server URL")?;

    let flag = ConnectivityFlag::offline();
    let probe = HealthProbe::new(client.clone(), flag.clone());
    let online = if cli.offline {
        tracing::info!("Offline mode, progress stays on this device");
        false
    } else {
        probe.refresh().await
    };

    if matches!(cli.command, Commands::Status) {
        return print_status(&cli, &client, online);
    }

    let pool = vibe_storage::create_pool(&config.storage.database_url).await?;
    vibe_storage::run_migrations(&pool).await?;

    let reconciler = Reconciler::new(
        Arc::new(LocalProgressStore::new(pool)),
        Arc::new(RemoteProgressStore::new(client)),
        Arc::new(flag),
        config.progress_config(),
    );
    let owner_id = OwnerId::new(config.owner_id.as_str());

    match &cli.command {
        Commands::Record {
            item,
            part,
            position,
            duration,
        } => {
            let item = ContentItemId::new(item.as_str());
            let outcome = reconciler
                .record_progress(&owner_id, &item, *part, *position, *duration)
                .await;
            print_outcome(&cli, &outcome)?;
        }
        Commands::Resume { item } => {
            let item = ContentItemId::new(item.as_str());
            let resume = reconciler.find_resume_point(&owner_id, &item).await;
            print_resume(&cli, &item, resume.as_ref())?;
        }
        Commands::History => {
            let records = reconciler.continue_listening(&owner_id).await;
            print_history(&cli, &records)?;
        }
        Commands::Status => {}
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_status(cli: &Cli, client: &VibeServerClient, online: bool) -> anyhow::Result<()> {
    if cli.json {
        return print_json(&serde_json::json!({
            "server": client.url(),
            "online": online,
        }));
    }

    let state = match (cli.offline, online) {
        (true, _) => "offline (forced)",
        (false, true) => "online",
        (false, false) => "unreachable",
    };
    println!("{}: {}", client.url(), state);
    Ok(())
}

fn print_outcome(cli: &Cli, outcome: &RecordOutcome) -> anyhow::Result<()> {
    if cli.json {
        return print_json(outcome);
    }

    match outcome {
        RecordOutcome::Suppressed { position } => {
            println!("Not saved: position {:.1}s is too close to the start", position);
        }
        RecordOutcome::Recorded {
            record,
            local,
            remote,
        } => {
            println!(
                "{} part {} at {:.0}s",
                record.content_item_id, record.part_index, record.position
            );
            match local {
                LocalWrite::Stored => println!("  device: saved"),
                LocalWrite::Superseded => println!("  device: newer progress already saved"),
                LocalWrite::Dropped { warning } => println!("  device: {}", warning),
            }
            match remote {
                RemoteWrite::Synced => println!("  server: synced"),
                RemoteWrite::Superseded => println!("  server: newer progress already synced"),
                RemoteWrite::Offline => println!("  server: offline, saved on this device only"),
                RemoteWrite::Degraded { reason } => println!("  server: not synced ({})", reason),
            }
        }
    }
    Ok(())
}

fn print_resume(
    cli: &Cli,
    item: &ContentItemId,
    resume: Option<&ProgressRecord>,
) -> anyhow::Result<()> {
    if cli.json {
        return print_json(&resume);
    }

    match resume {
        Some(record) => println!(
            "{}: resume part {} at {:.0}s",
            item, record.part_index, record.position
        ),
        None => println!("{}: no progress, start from the beginning", item),
    }
    Ok(())
}

fn print_history(cli: &Cli, records: &[ProgressRecord]) -> anyhow::Result<()> {
    if cli.json {
        return print_json(&records);
    }

    if records.is_empty() {
        println!("No listening history yet");
        return Ok(());
    }

    for record in records {
        let state = if record.is_completed() {
            "finished".to_string()
        } else {
            format!("{}%", record.percent_complete())
        };
        println!(
            "{:<24} part {:<3} {:>8.0}s  {}",
            record.content_item_id, record.part_index, record.position, state
        );
    }
    Ok(())
}
