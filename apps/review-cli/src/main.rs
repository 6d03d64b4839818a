//! PDF findings review tool
//!
//! Loads a validator's findings report (and optionally the PDF it refers
//! to), then walks the reviewer through the document page by page:
//!
//! - jump between pages that still have open errors or warnings
//! - mark single findings or whole pages as resolved
//! - export the findings that remain open
//!
//! Session output goes to stdout, logging to stderr.

use clap::Parser;
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod command;
mod config;
mod load;
mod render;
mod repl;

use config::{Args, SessionConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting pdf-review v{}", env!("CARGO_PKG_VERSION"));

    let mut session = load::load_session(&args.report, args.document.as_deref()).await;
    tracing::info!(
        "Reviewing {} finding(s) across {} page(s)",
        session.store().len(),
        session.page_count()
    );

    let config = SessionConfig::from(&args);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    repl::run(&mut session, &config, stdin.lock(), &mut stdout.lock())?;

    tracing::info!("{}", render::summary(&session.summary()));
    Ok(())
}
