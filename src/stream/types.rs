use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Attribute map of a stream image, keyed by attribute name.
pub type Image = HashMap<String, AttributeValue>;

/// A batch of change records as delivered by the stream trigger.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StreamEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<ChangeRecord>,
}

impl StreamEvent {
    /// Reads a captured stream event from a JSON file.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path).await?;
        serde_json::from_str(&raw).map_err(|e| Error::InvalidEvent(e.to_string()))
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChangeRecord {
    #[serde(rename = "eventID", default)]
    pub event_id: String,
    #[serde(rename = "eventName", default)]
    pub event_name: String,
    #[serde(rename = "dynamodb", default)]
    pub change: StreamRecord,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StreamRecord {
    #[serde(rename = "Keys", default)]
    pub keys: Image,
    /// Post-mutation image. Absent for removals.
    #[serde(rename = "NewImage", default)]
    pub new_image: Image,
    #[serde(rename = "SequenceNumber", default, skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Modify,
    Remove,
    Other,
}

impl ChangeKind {
    pub fn parse(event_name: &str) -> Self {
        if fold_eq(event_name, "insert") {
            ChangeKind::Insert
        } else if fold_eq(event_name, "modify") {
            ChangeKind::Modify
        } else if fold_eq(event_name, "remove") {
            ChangeKind::Remove
        } else {
            ChangeKind::Other
        }
    }
}

/// Case-insensitive comparison under Unicode simple case folding, so that
/// e.g. `ſ` (long s) matches `s` and the Kelvin sign matches `k`.
fn fold_eq(a: &str, b: &str) -> bool {
    let mut left = a.chars();
    let mut right = b.chars();
    loop {
        match (left.next(), right.next()) {
            (None, None) => return true,
            (Some(x), Some(y)) if chars_fold_eq(x, y) => continue,
            _ => return false,
        }
    }
}

fn chars_fold_eq(x: char, y: char) -> bool {
    x == y
        || x.to_lowercase().eq(y.to_lowercase())
        || x.to_uppercase().eq(y.to_uppercase())
}

impl ChangeRecord {
    pub fn kind(&self) -> ChangeKind {
        ChangeKind::parse(&self.event_name)
    }
}

/// A stream attribute value, tagged with its wire type (`{"S": "Ana"}`).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum AttributeValue {
    #[serde(rename = "S")]
    S(String),
    /// Numbers travel as strings to keep their exact precision.
    #[serde(rename = "N")]
    N(String),
    /// Base64 text as sent on the wire.
    #[serde(rename = "B")]
    B(String),
    #[serde(rename = "BOOL")]
    Bool(bool),
    #[serde(rename = "NULL")]
    Null(bool),
    #[serde(rename = "SS")]
    Ss(Vec<String>),
    #[serde(rename = "NS")]
    Ns(Vec<String>),
    #[serde(rename = "BS")]
    Bs(Vec<String>),
    #[serde(rename = "L")]
    L(Vec<AttributeValue>),
    #[serde(rename = "M")]
    M(HashMap<String, AttributeValue>),
}

impl AttributeValue {
    pub fn type_tag(&self) -> &'static str {
        match self {
            AttributeValue::S(_) => "S",
            AttributeValue::N(_) => "N",
            AttributeValue::B(_) => "B",
            AttributeValue::Bool(_) => "BOOL",
            AttributeValue::Null(_) => "NULL",
            AttributeValue::Ss(_) => "SS",
            AttributeValue::Ns(_) => "NS",
            AttributeValue::Bs(_) => "BS",
            AttributeValue::L(_) => "L",
            AttributeValue::M(_) => "M",
        }
    }

    /// Scalar text of this value, `None` for nulls and collections.
    pub fn as_text(&self) -> Option<String> {
        match self {
            AttributeValue::S(s) | AttributeValue::N(s) | AttributeValue::B(s) => Some(s.clone()),
            AttributeValue::Bool(b) => Some(b.to_string()),
            AttributeValue::Null(_)
            | AttributeValue::Ss(_)
            | AttributeValue::Ns(_)
            | AttributeValue::Bs(_)
            | AttributeValue::L(_)
            | AttributeValue::M(_) => None,
        }
    }
}
