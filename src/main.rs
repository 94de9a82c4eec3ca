use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// File-backed book catalog with an interactive console menu.
#[derive(Parser)]
#[command(name = "bookshelf", version, about)]
struct Cli {
    /// Path to the JSON file holding the catalog
    #[arg(long, default_value = ".data/books.json")]
    data_file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookshelf=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    bookshelf::interface::console::run(cli.data_file)
}
