//! Arabic PDF Web - HTTP service rendering Arabic HTML documents to PDF.

mod helpers;
mod routes;
mod state;
mod templates;

use anyhow::{Context, Result};
use arabic_pdf_core::AppConfig;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use state::AppState;

#[derive(Parser, Debug)]
#[command(name = "arabic-pdf-web")]
#[command(author, version, about = "Arabic HTML to PDF Web Server", long_about = None)]
struct Args {
    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind to
    #[arg(short, long, default_value = "8000")]
    port: u16,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory scanned for fonts
    #[arg(long, env = "FONT_DIR")]
    font_dir: Option<PathBuf>,

    /// WeasyPrint executable
    #[arg(long, env = "WEASYPRINT_BIN")]
    weasyprint: Option<String>,

    /// Render timeout in seconds (0 disables it)
    #[arg(long, env = "RENDER_TIMEOUT")]
    render_timeout: Option<u64>,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(ref dir) = self.font_dir {
            config.fonts.dir = Some(dir.clone());
        }
        if let Some(ref command) = self.weasyprint {
            config.render.command.clone_from(command);
        }
        if let Some(timeout) = self.render_timeout {
            config.render.timeout_seconds = timeout;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before parsing args so env vars are available)
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let default_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path).context("Failed to load config file")?
    } else {
        AppConfig::load()
    };
    args.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    let state = Arc::new(AppState::new(config));
    info!(
        "Serving fonts from {} ({} Arabic-capable), rendering with {}",
        state.converter.catalog().dir().display(),
        state.converter.list_fonts().await.len(),
        state.converter.engine_name()
    );

    let app = routes::router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
