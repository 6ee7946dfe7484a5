//! Per-invocation batch relay.
//!
//! A [`Relay`] turns one [`StreamEvent`] into at most one published message:
//! every qualifying record becomes a [`UserRecord`], the batch is encoded as a
//! single JSON array, and the array is handed to the [`Publisher`] once.
//!
//! # Example
//!
//! ```rust,no_run
//! use user_stream_relay::{sns::StdoutPublisher, Config, Relay};
//! use user_stream_relay::stream::StreamEvent;
//!
//! # async fn example() -> user_stream_relay::Result<()> {
//! let relay = Relay::new(Config::inserts_only("arn:aws:sns:us-east-2:1:users"), StdoutPublisher);
//! let outcome = relay.handle(&StreamEvent::default()).await?;
//! println!("{:?}", outcome);
//! # Ok(())
//! # }
//! ```

use crate::config::{Config, FilterMode};
use crate::sns::{JsonSerializer, Publisher};
use crate::stream::{ChangeKind, ChangeRecord, StreamEvent, UserRecord};
use crate::Result;
use serde::Serialize;
use tracing::{error, info};

/// What a single invocation did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Published {
        message_id: Option<String>,
        count: usize,
    },
    /// Nothing qualified and empty batches are not sent.
    Skipped,
}

pub struct Relay<P> {
    config: Config,
    publisher: P,
}

impl<P: Publisher> Relay<P> {
    pub fn new(config: Config, publisher: P) -> Self {
        Self { config, publisher }
    }

    fn admits(&self, record: &ChangeRecord) -> bool {
        match self.config.filter {
            FilterMode::InsertsOnly => record.kind() == ChangeKind::Insert,
            FilterMode::All => true,
        }
    }

    /// Extracts the users of every qualifying record, in input order.
    pub fn collect(&self, event: &StreamEvent) -> Vec<UserRecord> {
        let mut users = Vec::with_capacity(event.records.len());

        for record in &event.records {
            info!(
                event_id = %record.event_id,
                event_name = %record.event_name,
                "Processing change record"
            );

            if self.admits(record) {
                users.push(UserRecord::from_image(&record.change.new_image));
            } else {
                info!(
                    event_id = %record.event_id,
                    event_name = %record.event_name,
                    "Skipping record, not an insert"
                );
            }
        }

        users
    }

    /// Handles one batch: collect, serialize, publish once.
    ///
    /// Serialization and publish failures are logged and returned as is.
    pub async fn handle(&self, event: &StreamEvent) -> Result<Outcome> {
        let users = self.collect(event);

        if users.is_empty() && !self.config.publishes_empty() {
            info!(
                records = event.records.len(),
                "No records qualified, skipping publish"
            );
            return Ok(Outcome::Skipped);
        }

        let body = JsonSerializer::serialize(&users).map_err(|e| {
            error!("Failed to serialize batch: {}", e);
            e
        })?;

        let message_id = self
            .publisher
            .publish(&self.config.topic_arn, &body)
            .await
            .map_err(|e| {
                error!(topic = %self.config.topic_arn, "Failed to publish batch: {}", e);
                e
            })?;

        info!(
            topic = %self.config.topic_arn,
            count = users.len(),
            message_id = ?message_id,
            "Published batch"
        );

        Ok(Outcome::Published {
            message_id,
            count: users.len(),
        })
    }
}
