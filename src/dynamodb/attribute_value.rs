use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An item or nested map, kept in the key order the stream delivered it in.
pub type Item = IndexMap<String, AttributeValue>;

/// A DynamoDB typed value in its stream JSON form, e.g. `{"S": "abc"}`.
///
/// Binary values stay base64 encoded and numbers stay textual; nothing in the
/// relay does arithmetic on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    #[serde(rename = "B")]
    Binary(String),

    #[serde(rename = "BS")]
    BinarySet(Vec<String>),

    #[serde(rename = "L")]
    List(Vec<AttributeValue>),

    #[serde(rename = "M")]
    Map(Item),

    #[serde(rename = "N")]
    Number(String),

    #[serde(rename = "NS")]
    NumberSet(Vec<String>),

    #[serde(rename = "NULL")]
    Null(bool),

    #[serde(rename = "S")]
    String(String),

    #[serde(rename = "SS")]
    StringSet(Vec<String>),

    #[serde(rename = "BOOL")]
    Bool(bool),
}

impl AttributeValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Textual scalar: a string or a number.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) | AttributeValue::Number(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Item> {
        match self {
            AttributeValue::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeValue::Binary(_) => "B",
            AttributeValue::BinarySet(_) => "BS",
            AttributeValue::List(_) => "L",
            AttributeValue::Map(_) => "M",
            AttributeValue::Number(_) => "N",
            AttributeValue::NumberSet(_) => "NS",
            AttributeValue::Null(_) => "NULL",
            AttributeValue::String(_) => "S",
            AttributeValue::StringSet(_) => "SS",
            AttributeValue::Bool(_) => "BOOL",
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Binary(_) => f.write_str("<binary>"),
            AttributeValue::BinarySet(values) => {
                write_joined(f, '{', '}', values.iter().map(|_| "<binary>"))
            }
            AttributeValue::List(values) => write_joined(f, '[', ']', values.iter()),
            AttributeValue::Map(item) => {
                write_joined(f, '{', '}', item.iter().map(|(k, v)| format!("{k}: {v}")))
            }
            AttributeValue::Number(n) => f.write_str(n),
            AttributeValue::NumberSet(values) | AttributeValue::StringSet(values) => {
                write_joined(f, '{', '}', values.iter())
            }
            AttributeValue::Null(_) => f.write_str("null"),
            AttributeValue::String(s) => f.write_str(s),
            AttributeValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

fn write_joined<I>(f: &mut fmt::Formatter<'_>, open: char, close: char, values: I) -> fmt::Result
where
    I: Iterator,
    I::Item: fmt::Display,
{
    write!(f, "{open}")?;
    for (i, value) in values.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{value}")?;
    }
    write!(f, "{close}")
}
