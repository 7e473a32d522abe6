//! Endpoint and timeout configuration for order delivery.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Where the email service listens when nothing is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:2000/email";

/// Delivery settings for the HTTP notifier.
///
/// The checkout flow itself enforces no timeout; these bound the HTTP
/// transport only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyPolicy {
    /// URL the order payload is POSTed to.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Total request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    3
}

fn default_timeout_secs() -> u64 {
    10
}

impl NotifyPolicy {
    /// Create a policy for an endpoint with default timeouts.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Set the total request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs().max(1);
        self
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for NotifyPolicy {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            connect_timeout_secs: default_connect_timeout_secs(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let policy = NotifyPolicy::default();
        assert_eq!(policy.endpoint, "http://localhost:2000/email");
        assert_eq!(policy.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_timeout_floor() {
        let policy = NotifyPolicy::new("http://mail.local/email").with_timeout(Duration::from_millis(200));
        assert_eq!(policy.timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_partial_deserialize() {
        let policy: NotifyPolicy = serde_json::from_str(r#"{"timeout_secs": 30}"#).unwrap();
        assert_eq!(policy.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(policy.timeout_secs, 30);
        assert_eq!(policy.connect_timeout_secs, 3);
    }
}
