//! SNS publish adapter for proximity alerts.

use async_trait::async_trait;
use aws_sdk_sns::error::DisplayErrorContext;
use aws_sdk_sns::Client;

use fleet_proximity_lib::{AlertPublisher, Error, Result};

/// Publishes alerts to a single SNS topic.
#[derive(Clone)]
pub struct SnsAlertPublisher {
    client: Client,
    topic_arn: String,
}

impl SnsAlertPublisher {
    pub fn new(client: Client, topic_arn: impl Into<String>) -> Self {
        Self {
            client,
            topic_arn: topic_arn.into(),
        }
    }
}

#[async_trait]
impl AlertPublisher for SnsAlertPublisher {
    async fn publish(&self, subject: &str, body: &str) -> Result<Option<String>> {
        let output = self
            .client
            .publish()
            .topic_arn(&self.topic_arn)
            .subject(subject)
            .message(body)
            .send()
            .await
            .map_err(|e| Error::Publish {
                topic: self.topic_arn.clone(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        Ok(output.message_id)
    }

    fn destination(&self) -> &str {
        &self.topic_arn
    }
}
