use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use libris::core::config::{self, CliOverrides, LibrisConfig};
use libris::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "libris", about = "Search books and keep a list of favorites")]
struct Args {
    /// Directory for saved favorites (default: ~/.libris)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Base URL of the catalog API
    #[arg(long)]
    catalog_url: Option<String>,

    /// Results per search (1-40)
    #[arg(long)]
    page_size: Option<u32>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to libris.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("libris.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        LibrisConfig::default()
    });
    let overrides = CliOverrides {
        data_dir: args.data_dir,
        catalog_url: args.catalog_url,
        page_size: args.page_size,
    };
    let resolved = config::resolve(&file_config, &overrides);

    log::info!(
        "Libris starting up (catalog: {}, page size: {}, data dir: {:?})",
        resolved.catalog_base_url,
        resolved.page_size,
        resolved.data_dir
    );

    tui::run(resolved)
}
