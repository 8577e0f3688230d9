use anyhow::Result;
use davinci::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
