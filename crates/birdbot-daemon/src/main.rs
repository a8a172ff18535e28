//! birdbot: stays connected to a chat endpoint and answers every private
//! message with a canned reply.
//!
//!   birdbot --config config.json
//!
//! Exits non-zero when the configuration cannot be loaded, the handshake
//! fails, or the connection is lost. `Ctrl-C` closes the connection and
//! exits cleanly.

mod config;

use std::path::PathBuf;

use anyhow::Context;
use birdbot_client::Bot;
use birdbot_core::Credential;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(name = "birdbot", version, about)]
struct Args {
    /// Location of the configuration file.
    #[arg(long, env = "BIRDBOT_CONFIG", default_value = "config.json")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("birdbot=info".parse()?))
        .init();

    let args = Args::parse();
    let config = Config::load(&args.config)?;

    let bot = Bot::websocket(Credential::new(config.auth_token));
    bot.configure(config.address)
        .await
        .context("invalid configuration")?;

    let listener = match bot.connect().await {
        Ok(listener) => listener,
        Err(e) => {
            if let Err(close) = bot.close().await {
                tracing::debug!("Nothing to close: {}", close);
            }
            return Err(e).context("cannot connect");
        }
    };

    let run = listener.join();
    tokio::pin!(run);

    tokio::select! {
        result = &mut run => result?,
        signal = tokio::signal::ctrl_c() => {
            signal.context("cannot listen for ctrl-c")?;
            tracing::info!("Interrupted, closing connection");
            if let Err(e) = bot.close().await {
                tracing::warn!("{}", e);
            }
            run.await?;
        }
    }

    Ok(())
}
