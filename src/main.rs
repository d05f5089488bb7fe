use clap::Parser;
use color_eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;

mod app;
mod cli;
pub mod command;
mod config;
mod dialogs;
pub mod overlay;
mod session;
mod theme;
pub mod tui;
mod ui;

pub use theme::Theme;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = cli::Args::parse();
    let _guard = initialize_logging(args.log_level.as_deref())?;
    info!("Starting emberhall");

    let mut config = config::load()?;
    if let Some(theme) = args.theme {
        config.theme.name = theme;
    }

    let mut app = App::new(config)?;
    app.run().await?;

    Ok(())
}

fn initialize_logging(log_level: Option<&str>) -> Result<WorkerGuard> {
    let directory = dirs::data_local_dir().map_or_else(
        || std::path::PathBuf::from("logs"),
        |path| path.join("emberhall").join("logs"),
    );
    std::fs::create_dir_all(&directory)?;

    let file_appender = tracing_appender::rolling::daily(&directory, "emberhall.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = match log_level {
        Some(directive) => tracing_subscriber::EnvFilter::try_new(directive)?,
        None => tracing_subscriber::EnvFilter::from_default_env(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .init();

    Ok(guard)
}
