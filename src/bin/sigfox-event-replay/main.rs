mod args;

use std::{fs, sync::Arc, time::Duration};

use anyhow::Context as _;
use args::Args;
use async_trait::async_trait;
use clap::Parser as _;
use sigfox_slack_relay::{
    dynamodb::DynamoDbEvent,
    error::DeliveryError,
    relay::Relay,
    slack::{Notifier, SlackWebhookNotifier, confirmation},
    telemetry::init_tracing,
};

struct StdoutNotifier;

#[async_trait]
impl Notifier for StdoutNotifier {
    async fn notify(&self, text: &str) -> Result<String, DeliveryError> {
        print!("{text}");
        Ok(confirmation(text))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();

    let json = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read file: {:?}", args.file))?;
    let event: DynamoDbEvent = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse DynamoDB stream event: {:?}", args.file))?;

    let notifier: Arc<dyn Notifier> = match args.webhook_url {
        Some(url) => Arc::new(
            SlackWebhookNotifier::new(url, Duration::from_secs(args.webhook_timeout_secs))
                .context("failed to create Slack notifier")?,
        ),
        None => Arc::new(StdoutNotifier),
    };

    let attributes = Relay::new(notifier, args.notify_mode)
        .handle(&event)
        .await
        .context("failed to relay event")?;

    println!(
        "{}",
        serde_json::to_string_pretty(&attributes).context("failed to serialize attributes")?
    );

    Ok(())
}
