mod args;

use std::{process::ExitCode, sync::Arc, time::Duration};

use anyhow::{Context as _, Result, anyhow};
use args::Args;
use clap::Parser as _;
use lambda_runtime::{Error, LambdaEvent, service_fn};
use sigfox_slack_relay::{
    dynamodb::{AttributeValue, DynamoDbEvent},
    relay::Relay,
    slack::SlackWebhookNotifier,
    telemetry::init_tracing,
};
use tracing::{debug, error};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("{e:#}");
        return ExitCode::from(1);
    }

    ExitCode::from(0)
}

async fn run() -> Result<()> {
    let args = Args::parse();

    let notifier = SlackWebhookNotifier::new(
        args.webhook_url,
        Duration::from_secs(args.webhook_timeout_secs),
    )
    .context("failed to create Slack notifier")?;
    let relay = Arc::new(Relay::new(Arc::new(notifier), args.notify_mode));

    lambda_runtime::run(service_fn(move |event: LambdaEvent<DynamoDbEvent>| {
        let relay = Arc::clone(&relay);
        async move { handle(&relay, event).await }
    }))
    .await
    .map_err(|e| anyhow!(e))
    .context("Lambda runtime failed")
}

async fn handle(
    relay: &Relay,
    event: LambdaEvent<DynamoDbEvent>,
) -> Result<Vec<AttributeValue>, Error> {
    let request_id = event.context.request_id;

    if let Ok(json) = serde_json::to_string(&event.payload) {
        debug!(%request_id, event = %json, "received DynamoDB stream event");
    }

    relay.handle(&event.payload).await.map_err(|e| {
        error!(%request_id, error = %e, "failed to relay batch");
        Error::from(e)
    })
}
