//! Hosted form relay
//!
//! Submissions are POSTed as JSON to `{endpoint_base}/{form_id}`. The relay
//! forwards them by email; `_replyto` and `_subject` shape that email.

use crate::error::{ContactError, ContactResult};
use crate::form::ContactForm;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Environment variable holding the relay form id
pub const FORM_ID_ENV: &str = "PUBLIC_FORMSPREE_FORM_ID";

/// Form id shipped in templates; treated as unconfigured
pub const PLACEHOLDER_FORM_ID: &str = "your-form-id";

const DEFAULT_ENDPOINT_BASE: &str = "https://formspree.io/f";

/// Where submissions go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Relay form identifier
    pub form_id: Option<String>,
    /// Endpoint prefix the form id is appended to
    pub endpoint_base: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            form_id: None,
            endpoint_base: DEFAULT_ENDPOINT_BASE.to_string(),
            timeout_secs: 10,
        }
    }
}

impl RelayConfig {
    /// Relay for `form_id`
    pub fn new(form_id: Option<String>) -> Self {
        Self {
            form_id,
            ..Default::default()
        }
    }

    /// Read the form id from `PUBLIC_FORMSPREE_FORM_ID`
    pub fn from_env() -> Self {
        Self::new(std::env::var(FORM_ID_ENV).ok())
    }

    /// Send submissions somewhere other than the hosted relay
    pub fn with_endpoint_base(mut self, endpoint_base: impl Into<String>) -> Self {
        self.endpoint_base = endpoint_base.into();
        self
    }

    /// Effective form id, the placeholder when none is set
    pub fn form_id(&self) -> &str {
        match self.form_id.as_deref() {
            Some(id) if !id.is_empty() => id,
            _ => PLACEHOLDER_FORM_ID,
        }
    }

    /// Submission URL
    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.endpoint_base.trim_end_matches('/'), self.form_id())
    }

    /// Whether a real form id is set
    pub fn is_configured(&self) -> bool {
        self.form_id() != PLACEHOLDER_FORM_ID
    }
}

/// Outcome of [`check_relay_config`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayCheck {
    /// A real form id is set
    pub configured: bool,
    /// Submission URL that would be used
    pub endpoint: String,
    /// Effective form id
    pub form_id: String,
    /// A test submission can be attempted
    pub can_test: bool,
    /// Human readable summary
    pub message: String,
}

/// Describe the relay configuration without sending anything
pub fn check_relay_config(config: &RelayConfig) -> RelayCheck {
    let configured = config.is_configured();
    let message = if configured {
        "Form relay is configured".to_string()
    } else {
        format!("Form relay is not configured; set {FORM_ID_ENV}")
    };
    RelayCheck {
        configured,
        endpoint: config.endpoint(),
        form_id: config.form_id().to_string(),
        can_test: configured,
        message,
    }
}

/// JSON body sent to the relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayPayload {
    /// Sender name
    pub name: String,
    /// Sender email
    pub email: String,
    /// Message subject
    pub subject: String,
    /// Message body
    pub message: String,
    /// Reply-to address of the forwarded email
    #[serde(rename = "_replyto")]
    pub reply_to: String,
    /// Subject line of the forwarded email
    #[serde(rename = "_subject")]
    pub email_subject: String,
}

impl From<&ContactForm> for RelayPayload {
    fn from(form: &ContactForm) -> Self {
        Self {
            name: form.name.clone(),
            email: form.email.clone(),
            subject: form.subject.clone(),
            message: form.message.clone(),
            reply_to: form.email.clone(),
            email_subject: format!("Nuevo mensaje de {}: {}", form.name, form.subject),
        }
    }
}

/// Delivers a validated form
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRelay: Send + Sync {
    /// Whether submissions can be attempted at all
    fn is_configured(&self) -> bool;

    /// Deliver `form` once
    async fn submit(&self, form: &ContactForm) -> ContactResult<()>;
}

/// HTTP client for the hosted relay
#[derive(Debug, Clone)]
pub struct FormRelay {
    client: Client,
    config: RelayConfig,
}

impl FormRelay {
    /// Create a relay client
    pub fn new(config: RelayConfig) -> ContactResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// The active configuration
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

#[async_trait]
impl MessageRelay for FormRelay {
    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    #[instrument(skip(self, form), fields(endpoint = %self.config.endpoint()))]
    async fn submit(&self, form: &ContactForm) -> ContactResult<()> {
        if !self.config.is_configured() {
            warn!("Form relay is not configured. Set {} to enable the contact form", FORM_ID_ENV);
            return Err(ContactError::NotConfigured);
        }

        let payload = RelayPayload::from(form);
        debug!("Submitting contact form");
        let response = self
            .client
            .post(self.config.endpoint())
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!("Relay request failed: {}", e);
                ContactError::Request(e)
            })?;

        let status = response.status();
        if status.is_success() {
            info!("Contact form delivered");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        error!("Relay rejected submission: {} {}", status, body);
        Err(ContactError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_cases() {
        for form_id in [None, Some(String::new()), Some(PLACEHOLDER_FORM_ID.to_string())] {
            let config = RelayConfig::new(form_id);
            assert!(!config.is_configured());
            assert_eq!(config.endpoint(), "https://formspree.io/f/your-form-id");
        }
    }

    #[test]
    fn test_endpoint() {
        let config = RelayConfig::new(Some("xyzabc12".to_string()));
        assert!(config.is_configured());
        assert_eq!(config.endpoint(), "https://formspree.io/f/xyzabc12");

        let local = config.with_endpoint_base("http://127.0.0.1:9000/f/");
        assert_eq!(local.endpoint(), "http://127.0.0.1:9000/f/xyzabc12");
    }

    #[test]
    fn test_check_relay_config() {
        let check = check_relay_config(&RelayConfig::default());
        assert!(!check.configured);
        assert!(!check.can_test);
        assert_eq!(check.form_id, PLACEHOLDER_FORM_ID);
        assert!(check.message.contains(FORM_ID_ENV));

        let check = check_relay_config(&RelayConfig::new(Some("abc".to_string())));
        assert!(check.configured && check.can_test);
        assert_eq!(check.endpoint, "https://formspree.io/f/abc");
    }

    #[test]
    fn test_payload_shape() {
        let form = ContactForm::new("Ana", "ana@example.com", "Hola", "Quiero hablar");
        let value = serde_json::to_value(RelayPayload::from(&form)).unwrap();
        assert_eq!(value["_replyto"], "ana@example.com");
        assert_eq!(value["_subject"], "Nuevo mensaje de Ana: Hola");
        assert_eq!(value["message"], "Quiero hablar");
    }

    #[tokio::test]
    async fn test_unconfigured_relay_sends_nothing() {
        let relay = FormRelay::new(RelayConfig::default()).unwrap();
        let form = ContactForm::new("Ana", "ana@example.com", "Hola", "Quiero hablar");
        assert!(matches!(relay.submit(&form).await, Err(ContactError::NotConfigured)));
    }
}
