//! bilichat - ask the Bilibili search AI from your terminal.
//!
//! Reads one question per line, submits it to the search service over
//! gRPC, polls for the asynchronously generated answer and prints it.
//! Errors are printed and the loop continues; only startup failures are
//! fatal.

mod client;
mod engine;
mod error;
mod extract;
mod headers;
mod proto;

use anyhow::{Context, Result};
use clap::Parser;
use error::ChatError;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bilichat")]
#[command(author, version, about = "Ask the Bilibili search AI from your terminal")]
struct Cli {
    /// Access key for authenticated requests (empty for unauthenticated mode).
    #[arg(long, default_value = "")]
    access_key: String,

    /// gRPC endpoint of the search service.
    #[arg(long, default_value = client::DEFAULT_ENDPOINT)]
    endpoint: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("bilichat=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let channel = client::connect(&cli.endpoint).await?;
    let service = client::BiliChat::new(channel, &cli.access_key)
        .context("failed to build call metadata")?;
    let mut engine = engine::ChatEngine::new(service);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"ask> ").await?;
        stdout.flush().await?;

        let Some(question) = lines.next_line().await? else {
            break; // EOF
        };

        match engine.run(&question).await {
            Ok(answer) => println!("{answer}"),
            Err(e) => report_failure(&e),
        }
        println!("--------------------");
    }

    Ok(())
}

/// Log the failure and print a line for the user. No error ends the loop.
fn report_failure(err: &ChatError) {
    match err {
        ChatError::Service { code, message } => {
            error!(code = *code, message = %message, "service rejected the request");
        }
        ChatError::Transport(status) => {
            error!("rpc failed: {status:?}");
        }
        ChatError::Timeout | ChatError::EmptyAnswer => {
            error!("{err}");
        }
    }
    println!("error: {err}");
}
