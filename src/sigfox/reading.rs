use chrono::{DateTime, FixedOffset};

use crate::{
    error::FormatError,
    sigfox::{convert_unix_to_local, decode_hex_float, parse_epoch_seconds, sensor_hex},
};

/// Fields pulled out of one INSERT/MODIFY stream record.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub device: String,

    /// Sort key of the table row.
    pub post_at: String,

    /// `payload.time`, Unix epoch seconds as text.
    pub pushed_at: String,

    /// `payload.data`, the hex encoded Sigfox frame.
    pub data: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub device: String,

    pub pushed_at: DateTime<FixedOffset>,

    pub temperature_celsius: f32,
}

impl SensorReading {
    pub fn decode(&self) -> Result<Measurement, FormatError> {
        let epoch_seconds = parse_epoch_seconds(&self.pushed_at)?;
        let temperature_celsius = decode_hex_float(sensor_hex(&self.data)?)?;

        Ok(Measurement {
            device: self.device.clone(),
            pushed_at: convert_unix_to_local(epoch_seconds),
            temperature_celsius,
        })
    }
}
