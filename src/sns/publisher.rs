use crate::{Error, Result};
use async_trait::async_trait;
use aws_config::Region;
use aws_sdk_sns::Client as SnsClient;
use tracing::{debug, info};

/// Destination for a serialized batch.
///
/// Implementations send exactly one message per call and return the
/// service-assigned message id when there is one.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, topic: &str, message: &str) -> Result<Option<String>>;
}

#[async_trait]
impl<'a, P: Publisher + ?Sized> Publisher for &'a P {
    async fn publish(&self, topic: &str, message: &str) -> Result<Option<String>> {
        (**self).publish(topic, message).await
    }
}

pub struct SnsPublisher {
    client: SnsClient,
}

impl SnsPublisher {
    /// Builds a client from the SDK default provider chain. `region`
    /// overrides `AWS_REGION` when given.
    pub async fn from_env(region: Option<&str>) -> Self {
        let mut loader = aws_config::from_env();
        if let Some(region) = region {
            loader = loader.region(Region::new(region.to_string()));
        }
        let sdk_config = loader.load().await;
        debug!(region = ?sdk_config.region(), "Loaded AWS configuration");

        Self::new(SnsClient::new(&sdk_config))
    }

    pub fn new(client: SnsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Publisher for SnsPublisher {
    async fn publish(&self, topic: &str, message: &str) -> Result<Option<String>> {
        let output = self
            .client
            .publish()
            .topic_arn(topic)
            .message(message)
            .send()
            .await
            .map_err(|e| Error::Publish(Box::new(e)))?;

        Ok(output.message_id().map(str::to_string))
    }
}

/// Logs the message instead of sending it. Used for dry runs.
pub struct StdoutPublisher;

#[async_trait]
impl Publisher for StdoutPublisher {
    async fn publish(&self, topic: &str, message: &str) -> Result<Option<String>> {
        info!(topic, "Dry run, not publishing");
        println!("{}", message);
        Ok(None)
    }
}
