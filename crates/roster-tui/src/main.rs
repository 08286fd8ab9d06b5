use clap::Parser;
use roster_tui::{Cli, try_main};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    try_main(Cli::parse()).await
}
