use std::sync::Arc;

use clap::ValueEnum;
use tracing::{debug, info, instrument};

use crate::{
    dynamodb::{AttributeValue, DynamoDbEvent},
    error::Result,
    extract::extract_readings,
    sigfox::SensorReading,
    slack::{Notifier, compose_text},
};

/// How many notifications a batch produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum NotifyMode {
    /// One notification per batch, from the last INSERT/MODIFY record.
    #[default]
    LastWins,

    /// One notification per INSERT/MODIFY record.
    PerRecord,
}

/// Turns a batch of stream records into Slack notifications.
pub struct Relay {
    notifier: Arc<dyn Notifier>,
    mode: NotifyMode,
}

impl Relay {
    pub fn new(notifier: Arc<dyn Notifier>, mode: NotifyMode) -> Self {
        Self { notifier, mode }
    }

    /// Returns the flattened payload attributes of every accepted record.
    ///
    /// Every message is composed before the first one is sent, so a decoding
    /// failure never leaves a batch half delivered. Delivery errors are not retried.
    #[instrument(skip_all, fields(records = event.records.len(), mode = ?self.mode))]
    pub async fn handle(&self, event: &DynamoDbEvent) -> Result<Vec<AttributeValue>> {
        let extraction = extract_readings(&event.records)?;

        let readings: Vec<&SensorReading> = match self.mode {
            NotifyMode::LastWins => extraction.last_reading().into_iter().collect(),
            NotifyMode::PerRecord => extraction.readings.iter().collect(),
        };

        if readings.is_empty() {
            debug!("no INSERT or MODIFY records in batch");
            return Ok(extraction.attributes);
        }

        let messages = readings
            .into_iter()
            .map(|reading| -> Result<String> { Ok(compose_text(&reading.decode()?)) })
            .collect::<Result<Vec<_>>>()?;

        for message in &messages {
            let confirmation = self.notifier.notify(message).await?;
            info!("{confirmation}");
        }

        Ok(extraction.attributes)
    }
}

#[cfg(test)]
mod tests {
    use mockall::Sequence;
    use serde_json::json;

    use super::*;
    use crate::{
        error::{DeliveryError, FormatError, RelayError},
        slack::{MockNotifier, confirmation},
    };

    fn record(event_name: &str, time: &str, data: &str) -> serde_json::Value {
        json!({
            "eventName": event_name,
            "dynamodb": {
                "Keys": {"device": {"S": "1A2B3C"}, "time": {"S": time}},
                "NewImage": {"payload": {"M": {
                    "time": {"S": time},
                    "data": {"S": data}
                }}}
            }
        })
    }

    fn event(records: Vec<serde_json::Value>) -> DynamoDbEvent {
        serde_json::from_value(json!({ "Records": records })).unwrap()
    }

    const TEN_AT_EPOCH: &str =
        ":thermometer: 現在の気温は10℃です (Sensor push time: 1970-01-01 09:00:00+09:00)\n";
    const TWENTY_THREE_AT_2020: &str =
        ":thermometer: 現在の気温は23.5℃です (Sensor push time: 2020-01-01 09:00:00+09:00)\n";

    #[tokio::test]
    async fn batch_without_upserts_sends_nothing() {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(0);

        let relay = Relay::new(Arc::new(notifier), NotifyMode::LastWins);
        let batch = event(vec![json!({
            "eventName": "REMOVE",
            "dynamodb": {"Keys": {"device": {"S": "1A2B3C"}, "time": {"S": "0"}}}
        })]);

        let attributes = relay.handle(&batch).await.unwrap();
        assert!(attributes.is_empty());
    }

    #[tokio::test]
    async fn empty_batch_sends_nothing() {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(0);

        let relay = Relay::new(Arc::new(notifier), NotifyMode::PerRecord);
        assert!(relay.handle(&DynamoDbEvent::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn batch_sends_one_notification_from_last_record() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|text| text == TWENTY_THREE_AT_2020)
            .times(1)
            .returning(|text| Ok(confirmation(text)));

        let relay = Relay::new(Arc::new(notifier), NotifyMode::LastWins);
        let batch = event(vec![
            record("INSERT", "0", "000041200000"),
            record("MODIFY", "1577836800", "000041bc0000"),
            record("REMOVE", "5", "000000000000"),
        ]);

        let attributes = relay.handle(&batch).await.unwrap();
        assert_eq!(
            attributes,
            [
                AttributeValue::String("0".to_owned()),
                AttributeValue::String("000041200000".to_owned()),
                AttributeValue::String("1577836800".to_owned()),
                AttributeValue::String("000041bc0000".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn per_record_mode_sends_each_record_in_order() {
        let mut seq = Sequence::new();
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|text| text == TEN_AT_EPOCH)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|text| Ok(confirmation(text)));
        notifier
            .expect_notify()
            .withf(|text| text == TWENTY_THREE_AT_2020)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|text| Ok(confirmation(text)));

        let relay = Relay::new(Arc::new(notifier), NotifyMode::PerRecord);
        let batch = event(vec![
            record("INSERT", "0", "000041200000"),
            record("INSERT", "1577836800", "000041bc0000"),
        ]);

        relay.handle(&batch).await.unwrap();
    }

    #[tokio::test]
    async fn delivery_error_is_returned_without_retry() {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(1).returning(|_| {
            Err(DeliveryError::Rejected {
                status: 500,
                body: "oops".to_owned(),
            })
        });

        let relay = Relay::new(Arc::new(notifier), NotifyMode::LastWins);
        let batch = event(vec![record("INSERT", "0", "000041200000")]);

        let err = relay.handle(&batch).await.unwrap_err();
        assert!(matches!(
            err,
            RelayError::Delivery(DeliveryError::Rejected { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn malformed_frame_sends_nothing() {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(0);

        let relay = Relay::new(Arc::new(notifier), NotifyMode::PerRecord);
        let batch = event(vec![
            record("INSERT", "0", "000041200000"),
            record("INSERT", "0", "0000zz200000"),
        ]);

        let err = relay.handle(&batch).await.unwrap_err();
        assert!(matches!(err, RelayError::Format(FormatError::HexDigit(_))));
    }

    #[tokio::test]
    async fn missing_field_sends_nothing() {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(0);

        let relay = Relay::new(Arc::new(notifier), NotifyMode::LastWins);
        let batch = event(vec![
            record("INSERT", "0", "000041200000"),
            json!({
                "eventName": "MODIFY",
                "dynamodb": {"Keys": {"device": {"S": "1A2B3C"}, "time": {"S": "0"}}}
            }),
        ]);

        let err = relay.handle(&batch).await.unwrap_err();
        assert!(matches!(err, RelayError::MissingField(path) if path == "NewImage"));
    }

    #[tokio::test]
    async fn last_wins_ignores_earlier_malformed_frames() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|text| text == TEN_AT_EPOCH)
            .times(1)
            .returning(|text| Ok(confirmation(text)));

        let relay = Relay::new(Arc::new(notifier), NotifyMode::LastWins);
        let batch = event(vec![
            record("INSERT", "0", "00"),
            record("INSERT", "0", "000041200000"),
        ]);

        relay.handle(&batch).await.unwrap();
    }
}
