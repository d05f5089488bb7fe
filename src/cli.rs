use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "emberhall", version, about = "A terminal role-playing game client")]
pub struct Args {
    /// Theme name (e.g., "Catppuccin Mocha")
    #[arg(short, long)]
    pub theme: Option<String>,

    /// Log filter directive (e.g., "debug", "emberhall=trace"); overrides
    /// RUST_LOG
    #[arg(short, long)]
    pub log_level: Option<String>,
}
