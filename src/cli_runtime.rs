use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use product_selector::config::DEFAULT_CONFIG_PATH;
use product_selector::logging::{self, LogTarget};

use crate::Commands;

#[derive(Parser)]
#[command(name = "product-selector")]
#[command(about = "Pick a product and view, then switch the services over to it", long_about = None)]
pub(crate) struct Cli {
    /// Config file naming the services and the product catalog
    #[arg(long, global = true, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Write logs to this file (the TUI logs nowhere otherwise)
    #[arg(long = "log-file", global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            let target = match cli.log_file {
                Some(path) => LogTarget::File(path),
                None => LogTarget::Off,
            };
            let _guard = logging::init(target)?;
            product_selector::tui::run_with_options(product_selector::tui::TuiRunOptions {
                config_path: cli.config,
            })?;
        }
        Some(command) => {
            let target = match cli.log_file {
                Some(path) => LogTarget::File(path),
                None => LogTarget::Stderr,
            };
            let _guard = logging::init(target)?;
            crate::cli_exec::handle_command(command, &cli.config)?
        }
    }

    Ok(())
}
