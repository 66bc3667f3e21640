use clap::Parser;
use sigfox_slack_relay::relay::NotifyMode;

#[derive(Debug, Parser)]
pub struct Args {
    #[arg(long, env = "SlackWebHook", hide_env_values = true)]
    pub webhook_url: String,

    #[arg(long, env = "NOTIFY_MODE", value_enum, default_value_t = NotifyMode::LastWins)]
    pub notify_mode: NotifyMode,

    #[arg(long, env = "WEBHOOK_TIMEOUT_SECS", default_value_t = 10)]
    pub webhook_timeout_secs: u64,
}
