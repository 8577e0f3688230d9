use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod chat;
pub mod key;
pub mod serve;

use key::KeyAction;

#[derive(Subcommand)]
enum Command {
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "2224")]
        port: String,
    },
    /// Start a terminal chat session
    Chat {},
    /// Manage the stored Gemini API key
    Key {
        #[arg(long, value_enum)]
        action: KeyAction,

        /// The key value, required for `set` and optional for `test`
        #[arg(long)]
        value: Option<String>,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    // Handle each sub command
    match args.command {
        Some(Command::Serve { host, port }) => {
            serve::run(host, port).await;
        }
        Some(Command::Chat {}) => {
            chat::run().await?;
        }
        Some(Command::Key { action, value }) => {
            key::run(action, value).await?;
        }
        None => {}
    }

    Ok(())
}
