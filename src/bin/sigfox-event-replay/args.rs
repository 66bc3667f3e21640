use std::path::PathBuf;

use clap::Parser;
use sigfox_slack_relay::relay::NotifyMode;

#[derive(Debug, Parser)]
pub struct Args {
    /// DynamoDB stream event JSON
    #[arg(long)]
    pub file: PathBuf,

    /// Prints messages instead of posting them when absent.
    #[arg(long, env = "SlackWebHook", hide_env_values = true)]
    pub webhook_url: Option<String>,

    #[arg(long, env = "NOTIFY_MODE", value_enum, default_value_t = NotifyMode::LastWins)]
    pub notify_mode: NotifyMode,

    #[arg(long, env = "WEBHOOK_TIMEOUT_SECS", default_value_t = 10)]
    pub webhook_timeout_secs: u64,
}
