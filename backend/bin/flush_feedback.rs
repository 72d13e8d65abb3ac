use anyhow::Result;
use clap::{Arg, Command};
use tracing::{error, info};
use walkiepal::{
    services::{FeedbackClient, FeedbackOutbox},
    store::JsonFileStore,
    utils::init_logging,
    Config,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let matches = Command::new("flush-feedback")
        .about("Deliver feedback that was buffered while offline")
        .arg(
            Arg::new("store")
                .long("store")
                .short('s')
                .help("Path of the JSON store file (defaults to WALKIEPAL_STORE_PATH)"),
        )
        .arg(
            Arg::new("endpoint")
                .long("endpoint")
                .short('e')
                .help("Feedback endpoint (defaults to FEEDBACK_ENDPOINT)"),
        )
        .get_matches();

    let config = Config::from_env()?;
    let store_path = matches.get_one::<String>("store").cloned().unwrap_or(config.store_path);
    let endpoint = matches.get_one::<String>("endpoint").cloned().unwrap_or(config.feedback_endpoint);

    let outbox = FeedbackOutbox::new(Arc::new(JsonFileStore::open(&store_path)), true);
    let Some(payload) = outbox.buffered() else {
        info!("📭 No buffered feedback in {}", store_path);
        return Ok(());
    };

    info!("📤 Sending buffered feedback to {}", endpoint);
    let client = FeedbackClient::new(endpoint);
    let result = client.submit(&payload).await;
    let message = outbox.settle(&result);

    match result {
        Ok(()) => info!("{}", message),
        Err(e) => {
            error!("{} ({})", message, e);
            anyhow::bail!("feedback still buffered in {}", store_path);
        }
    }

    Ok(())
}
