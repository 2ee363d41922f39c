//! Fleet vitality scoring binary.

mod cli;
mod logging;
mod score;

use clap::Parser;
use color_eyre::eyre;
use tracing::debug;

use crate::cli::{Cli, Commands};

fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    logging::init_logging(&cli.logs)?;

    debug!(version = env!("CARGO_PKG_VERSION"), "starting vitals");

    match cli.command {
        Commands::Score(args) => score::run(&args)?,
        Commands::Config => print!("{}", score::default_config_toml()?),
    }

    Ok(())
}
