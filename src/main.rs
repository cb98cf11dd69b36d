use anyhow::Result;
use clap::Parser;
use kakeibo::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    kakeibo::init_tracing(cli.verbose);
    cli.run().await
}
