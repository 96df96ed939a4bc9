//! Client for a separately deployed augmentation gateway.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::gateway::{AugmentRequest, Augmentation, Augmenter, GatewayError};

#[derive(Clone)]
pub struct RemoteGateway {
    client: Client,
    url: String,
}

impl RemoteGateway {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Augmenter for RemoteGateway {
    async fn augment(&self, request: &AugmentRequest) -> Result<Augmentation, GatewayError> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        let augmentation: Augmentation =
            serde_json::from_str(&body).map_err(|e| GatewayError::Malformed(e.to_string()))?;

        if augmentation.content.trim().is_empty() {
            return Err(GatewayError::EmptyContent);
        }
        Ok(augmentation)
    }
}
