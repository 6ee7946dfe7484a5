//! Error types and result handling for user-stream-relay.
//!
//! This module defines the main error type [`Error`] and a convenience
//! [`Result`] type alias used throughout the crate.
//!
//! # Example
//!
//! ```rust
//! use user_stream_relay::{Error, Result};
//!
//! fn load_topic() -> Result<String> {
//!     Err(Error::Config("topic_arn must not be empty".to_string()))
//! }
//!
//! match load_topic() {
//!     Ok(topic) => println!("Publishing to {}", topic),
//!     Err(Error::Config(msg)) => eprintln!("Configuration error: {}", msg),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use thiserror::Error;

/// The main error type for relay operations.
///
/// Field extraction never fails, so every variant here is terminal for the
/// invocation that produced it.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error, from the config file or `USER_RELAY_*` variables.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error when encoding the outbound batch.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The notification service rejected or failed the publish call.
    ///
    /// The underlying client error is kept as the source.
    #[error("Publish error: {0}")]
    Publish(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// I/O error, typically from reading a captured event file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A captured event file did not contain a stream event.
    #[error("Invalid event: {0}")]
    InvalidEvent(String),
}

/// A convenient Result type alias for relay operations.
///
/// This is equivalent to `std::result::Result<T, user_stream_relay::Error>`.
pub type Result<T> = std::result::Result<T, Error>;
