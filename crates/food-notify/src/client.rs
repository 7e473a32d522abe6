//! HTTP notifier for placed orders.

use async_trait::async_trait;
use food_commerce::checkout::{DispatchError, OrderNotifier, OrderSnapshot};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Url;

use crate::policy::NotifyPolicy;

/// Error building a notifier.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Invalid notification endpoint {url}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Sends each placed order as a JSON POST to the email service.
///
/// Any final status below 400 counts as delivered. Nothing is retried.
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpNotifier {
    /// Create a notifier for the policy's endpoint.
    pub fn new(policy: &NotifyPolicy) -> Result<Self, NotifyError> {
        let endpoint = Url::parse(&policy.endpoint).map_err(|e| NotifyError::InvalidEndpoint {
            url: policy.endpoint.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(NotifyError::InvalidEndpoint {
                url: policy.endpoint.clone(),
                reason: format!("unsupported scheme {}", endpoint.scheme()),
            });
        }

        let client = reqwest::Client::builder()
            .connect_timeout(policy.connect_timeout())
            .timeout(policy.timeout())
            .build()?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl OrderNotifier for HttpNotifier {
    async fn notify(&self, order: &OrderSnapshot) -> Result<(), DispatchError> {
        let body = order.to_json()?;

        tracing::debug!(endpoint = %self.endpoint, bytes = body.len(), "posting order");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(DispatchError::Http {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            });
        }

        tracing::debug!(status = status.as_u16(), "order accepted");
        Ok(())
    }
}

fn transport_error(e: reqwest::Error) -> DispatchError {
    if e.is_timeout() {
        DispatchError::Transport(format!("request timed out: {e}"))
    } else if e.is_connect() {
        DispatchError::Transport(format!("connection failed: {e}"))
    } else {
        DispatchError::Transport(e.to_string())
    }
}
