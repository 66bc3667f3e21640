use serde::Serialize;

use crate::sigfox::Measurement;

pub const SLACK_CHANNEL: &str = "#sigfox_test";
pub const SLACK_USERNAME: &str = "Sigfox Bot";
pub const SLACK_ICON_EMOJI: &str = ":robot_face:";

const PUSH_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

/// Incoming webhook body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlackMessage<'a> {
    pub channel: &'a str,
    pub text: &'a str,
    pub icon_emoji: &'a str,
    pub username: &'a str,
}

impl<'a> SlackMessage<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            channel: SLACK_CHANNEL,
            text,
            icon_emoji: SLACK_ICON_EMOJI,
            username: SLACK_USERNAME,
        }
    }
}

pub fn compose_text(measurement: &Measurement) -> String {
    format!(
        ":thermometer: 現在の気温は{}℃です (Sensor push time: {})\n",
        measurement.temperature_celsius,
        measurement.pushed_at.format(PUSH_TIME_FORMAT)
    )
}
