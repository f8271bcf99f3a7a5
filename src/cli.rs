use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::{
    api::{self, AppState},
    config::Config,
    error::ApiError,
    export::{DEFAULT_EXPORT_DIR, export_pages},
};

/// Cobalt download proxy and downloader pages
#[derive(Parser, Debug)]
#[command(name = "cobalt-proxy")]
#[command(about = "Proxy media URLs to a Cobalt API and serve downloader pages", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the downloader pages and the proxy endpoint
    Serve,

    /// Serve only the proxy endpoint, on every path
    ServeApi,

    /// Render the downloader pages to static HTML files
    Export {
        /// Output directory
        #[arg(long, default_value = DEFAULT_EXPORT_DIR)]
        out_dir: PathBuf,
    },
}

pub async fn execute(cli: Cli) -> Result<(), ApiError> {
    match cli.command {
        Commands::Serve => {
            let state = load_state()?;
            let bind_addr = state.config().bind_addr.clone();
            api::serve(api::site_router(state), &bind_addr).await
        }
        Commands::ServeApi => {
            let state = load_state()?;
            let bind_addr = state.config().bind_addr.clone();
            api::serve(api::standalone_router(state), &bind_addr).await
        }
        Commands::Export { out_dir } => {
            let written = export_pages(&out_dir).await?;
            info!("Exported {} page(s) to {}", written.len(), out_dir.display());
            Ok(())
        }
    }
}

fn load_state() -> Result<AppState, ApiError> {
    let config = Config::from_env()?;
    info!("Forwarding download requests to {}/", config.cobalt_api_url);
    AppState::new(config)
}
