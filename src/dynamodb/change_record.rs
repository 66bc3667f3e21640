use serde::{Deserialize, Serialize};

use crate::dynamodb::{EventName, Item};

/// A batch of DynamoDB stream records as delivered to the function.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DynamoDbEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<ChangeRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRecord {
    #[serde(rename = "eventID", default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,

    #[serde(rename = "eventName")]
    pub event_name: EventName,

    #[serde(rename = "eventSource", default, skip_serializing_if = "Option::is_none")]
    pub event_source: Option<String>,

    #[serde(rename = "eventSourceARN", default, skip_serializing_if = "Option::is_none")]
    pub event_source_arn: Option<String>,

    #[serde(rename = "awsRegion", default, skip_serializing_if = "Option::is_none")]
    pub aws_region: Option<String>,

    #[serde(rename = "dynamodb")]
    pub change: StreamRecord,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamRecord {
    #[serde(rename = "Keys", default)]
    pub keys: Item,

    #[serde(rename = "NewImage", default, skip_serializing_if = "Option::is_none")]
    pub new_image: Option<Item>,

    #[serde(rename = "OldImage", default, skip_serializing_if = "Option::is_none")]
    pub old_image: Option<Item>,

    #[serde(rename = "SequenceNumber", default, skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<String>,

    #[serde(
        rename = "ApproximateCreationDateTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub approximate_creation_date_time: Option<f64>,

    #[serde(rename = "StreamViewType", default, skip_serializing_if = "Option::is_none")]
    pub stream_view_type: Option<String>,
}
