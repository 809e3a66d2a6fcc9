use std::path::PathBuf;

use anyhow::Result;

use crate::config::DEFAULT_CONFIG_PATH;

#[derive(Clone, Debug)]
pub struct TuiRunOptions {
    pub config_path: PathBuf,
}

impl Default for TuiRunOptions {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }
}

pub fn run() -> Result<()> {
    crate::tui_shell::run()
}

pub fn run_with_options(opts: TuiRunOptions) -> Result<()> {
    crate::tui_shell::run_with_options(opts)
}
