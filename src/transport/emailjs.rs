//! EmailJS-compatible HTTP client.
//!
//! Speaks the public EmailJS REST surface: a JSON `POST` to
//! `/api/v1.0/email/send` carrying the service id, template id, public key
//! (as `user_id`), and the flat field map as `template_params`. A 2xx
//! response is success; everything else — including connection failures —
//! becomes a [`TransportFailure`] with the response text as the reason.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use tracing::debug;

use crate::transport::{SendApi, SendReceipt, SendRequest, TransportFailure};

/// Default relay endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.emailjs.com";

/// Wire shape of the EmailJS send call.
#[derive(Debug, Serialize)]
struct SendPayload<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a BTreeMap<String, String>,
}

/// HTTP client for an EmailJS-compatible relay.
#[derive(Debug, Clone)]
pub struct EmailJsApi {
    http: reqwest::Client,
    base_url: String,
}

impl EmailJsApi {
    /// Client against the public EmailJS endpoint.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client against a custom relay endpoint (self-hosted or test server).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        EmailJsApi {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn send_url(&self) -> String {
        format!("{}/api/v1.0/email/send", self.base_url.trim_end_matches('/'))
    }
}

impl Default for EmailJsApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SendApi for EmailJsApi {
    async fn send(&self, request: &SendRequest) -> Result<SendReceipt, TransportFailure> {
        let payload = SendPayload {
            service_id: &request.target.service_id,
            template_id: &request.target.template_id,
            user_id: &request.target.public_key,
            template_params: &request.params,
        };

        debug!(
            service_id = %request.target.service_id,
            template_id = %request.target.template_id,
            "dispatching relay send"
        );

        let response = self
            .http
            .post(self.send_url())
            .json(&payload)
            .send()
            .await
            .map_err(TransportFailure::new)?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status.is_success() {
            Ok(SendReceipt {
                detail: body,
                sent_at: Utc::now(),
            })
        } else {
            Err(TransportFailure::new(format!(
                "relay returned {status}: {body}"
            )))
        }
    }
}
