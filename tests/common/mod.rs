#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Mutex;
use user_stream_relay::sns::Publisher;
use user_stream_relay::stream::StreamEvent;
use user_stream_relay::{Error, Result};

pub const INSERTS_TOPIC: &str = "arn:aws:sns:us-east-2:000000000000:user-inserts";
pub const ALL_TOPIC: &str = "arn:aws:sns:us-east-2:000000000000:user-changes";

/// Records every publish call and optionally fails them.
#[derive(Default)]
pub struct RecordingPublisher {
    calls: Mutex<Vec<(String, String)>>,
    fail_with: Option<String>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_with: Some(message.to_string()),
        }
    }

    /// `(topic, message)` pairs in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn publish(&self, topic: &str, message: &str) -> Result<Option<String>> {
        let mut calls = self.calls.lock().unwrap();
        calls.push((topic.to_string(), message.to_string()));

        match &self.fail_with {
            Some(message) => Err(Error::Publish(message.clone().into())),
            None => Ok(Some(format!("msg-{}", calls.len()))),
        }
    }
}

/// A stream record whose new image holds the four user attributes as strings.
pub fn user_record(event_name: &str, id: &str, status: &str, first_name: &str, last_name: &str) -> Value {
    json!({
        "eventID": format!("event-{}", id),
        "eventName": event_name,
        "eventSource": "aws:dynamodb",
        "awsRegion": "us-east-2",
        "dynamodb": {
            "Keys": {"id": {"S": id}},
            "NewImage": {
                "id": {"S": id},
                "status": {"S": status},
                "firstName": {"S": first_name},
                "lastName": {"S": last_name}
            },
            "StreamViewType": "NEW_IMAGE"
        }
    })
}

pub fn stream_event(records: Vec<Value>) -> StreamEvent {
    serde_json::from_value(json!({ "Records": records })).unwrap()
}
