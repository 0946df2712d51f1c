//! recital-svc - Classroom recording service
//!
//! Students record short clips in the browser and POST them here; the
//! service stores them on a WebDAV backend and serves the teacher-facing
//! listing and reconciliation views.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use recital_common::config::{Overrides, Settings};
use recital_common::roster::Roster;
use recital_svc::store::WebDavStore;
use recital_svc::{build_router, AppState};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "recital-svc", version, about = "Classroom recording service")]
struct Cli {
    /// TOML config file (default: recital.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long)]
    listen_addr: Option<String>,

    /// WebDAV endpoint recordings are stored under
    #[arg(long)]
    webdav_url: Option<String>,

    /// Public base URL for playback links
    #[arg(long)]
    public_url: Option<String>,

    #[arg(long)]
    webdav_username: Option<String>,

    #[arg(long)]
    webdav_password: Option<String>,

    /// Remote directory holding recordings
    #[arg(long)]
    recordings_dir: Option<String>,

    /// Roster TOML file
    #[arg(long)]
    roster_path: Option<PathBuf>,

    /// Local recordings cache JSON file
    #[arg(long)]
    cache_path: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            listen_addr: self.listen_addr.clone(),
            webdav_url: self.webdav_url.clone(),
            public_url: self.public_url.clone(),
            webdav_username: self.webdav_username.clone(),
            webdav_password: self.webdav_password.clone(),
            recordings_dir: self.recordings_dir.clone(),
            roster_path: self.roster_path.clone(),
            cache_path: self.cache_path.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting RECITAL classroom recording service v{}",
        env!("CARGO_PKG_VERSION")
    );

    let cli = Cli::parse();
    let settings = Settings::resolve(cli.overrides(), cli.config.as_deref())?;
    info!("Recordings directory: {}", settings.recordings_dir);

    let roster = Roster::load(&settings.roster_path)?;
    info!(
        "Roster loaded from {} ({} classrooms)",
        settings.roster_path.display(),
        roster.class_ids().count()
    );

    let store = WebDavStore::new(&settings)?;
    info!("WebDAV store: {}", settings.webdav_url);

    let listen_addr = settings.listen_addr.clone();
    let state = AppState::new(Arc::new(store), Arc::new(roster), Arc::new(settings));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    info!("recital-svc listening on http://{}", listen_addr);
    info!("Health check: http://{}/health", listen_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
