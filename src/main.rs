use clap::Parser;

use linkrepo::cli::{Cli, Executor};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    Executor::execute(cli).await
}
