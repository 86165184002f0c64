/// Vibe Server - shared listening progress for every device of an owner
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vibe_core::OwnerId;
use vibe_server::{config::ServerConfig, create_router, state::AppState};

#[derive(Parser)]
#[command(name = "vibe-server")]
#[command(about = "Vibe listening progress server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        env = "VIBE_CONFIG",
        default_value = "config.toml"
    )]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// List the stored progress of an owner
    List {
        /// Owner whose records to print
        owner_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vibe_server=info,vibe_storage=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = ServerConfig::load_from(&cli.config)?;
    config.validate()?;

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::List { owner_id } => list_progress(config, &owner_id).await?,
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Vibe Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let pool = vibe_storage::create_pool(&config.storage.database_url).await?;
    vibe_storage::run_migrations(&pool).await?;
    tracing::info!("Database connected");

    let app = create_router(AppState::new(pool));

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn list_progress(config: ServerConfig, owner_id: &str) -> anyhow::Result<()> {
    let pool = vibe_storage::create_pool(&config.storage.database_url).await?;
    vibe_storage::run_migrations(&pool).await?;

    let owner_id = OwnerId::new(owner_id);
    let records = vibe_storage::progress::get_all(&pool, &owner_id).await?;

    println!("Progress for {} ({} items):", owner_id, records.len());
    for record in records {
        println!(
            "  {} - part {} at {:.0}s ({}%)",
            record.content_item_id,
            record.part_index,
            record.position,
            record.percent_complete()
        );
    }

    Ok(())
}
