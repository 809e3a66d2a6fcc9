use clap::Subcommand;

mod cli_exec;
mod cli_runtime;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List the products and views in the catalog
    Products {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Deactivate all products, activate one and notify the capture service
    Submit {
        /// Product id to activate
        #[arg(long)]
        product: String,
        /// View id to send to the capture service
        #[arg(long)]
        view: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    if let Err(err) = cli_runtime::run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
