use tracing::debug;

use crate::{
    dynamodb::{AttributeValue, ChangeRecord, Item},
    error::{RelayError, Result},
    sigfox::SensorReading,
};

const DEVICE_KEY: &str = "device";
const TIME_KEY: &str = "time";
const PAYLOAD_ATTRIBUTE: &str = "payload";
const PAYLOAD_TIME: &str = "time";
const PAYLOAD_DATA: &str = "data";

#[derive(Debug, Default)]
pub struct Extraction {
    /// One reading per INSERT/MODIFY record, in stream order.
    pub readings: Vec<SensorReading>,

    /// Every payload attribute of those records, flattened in stream order.
    pub attributes: Vec<AttributeValue>,
}

impl Extraction {
    /// The reading whose payload survives when later records overwrite earlier ones.
    pub fn last_reading(&self) -> Option<&SensorReading> {
        self.readings.last()
    }
}

/// Pulls sensor readings out of the INSERT/MODIFY records of a batch.
///
/// Any qualifying record lacking a required field fails the whole batch.
pub fn extract_readings(records: &[ChangeRecord]) -> Result<Extraction> {
    let mut extraction = Extraction::default();

    for record in records.iter().filter(|r| r.event_name.is_upsert()) {
        let reading = extract_reading(record, &mut extraction.attributes)?;
        extraction.readings.push(reading);
    }

    Ok(extraction)
}

fn extract_reading(
    record: &ChangeRecord,
    attributes: &mut Vec<AttributeValue>,
) -> Result<SensorReading> {
    let keys = &record.change.keys;
    let device = string_field(keys, DEVICE_KEY, "Keys.device")?;
    let post_at = string_field(keys, TIME_KEY, "Keys.time")?;

    let new_image = record
        .change
        .new_image
        .as_ref()
        .ok_or_else(|| missing("NewImage"))?;
    let payload_value = new_image
        .get(PAYLOAD_ATTRIBUTE)
        .ok_or_else(|| missing("NewImage.payload"))?;
    let payload = payload_value.as_map().ok_or_else(|| {
        RelayError::MissingField(format!(
            "NewImage.payload (expected M, got {})",
            payload_value.type_name()
        ))
    })?;

    let mut pushed_at = None;
    let mut data = None;
    for (key, value) in payload {
        debug!(device = %device, "{key} = {value}");
        attributes.push(value.clone());

        match key.as_str() {
            PAYLOAD_TIME => pushed_at = value.as_text(),
            PAYLOAD_DATA => data = value.as_str(),
            _ => {}
        }
    }

    Ok(SensorReading {
        device: device.to_owned(),
        post_at: post_at.to_owned(),
        pushed_at: pushed_at.ok_or_else(|| missing("payload.time"))?.to_owned(),
        data: data.ok_or_else(|| missing("payload.data"))?.to_owned(),
    })
}

fn string_field<'a>(item: &'a Item, key: &str, path: &str) -> Result<&'a str> {
    item.get(key)
        .and_then(AttributeValue::as_str)
        .ok_or_else(|| missing(path))
}

fn missing(path: &str) -> RelayError {
    RelayError::MissingField(path.to_owned())
}
