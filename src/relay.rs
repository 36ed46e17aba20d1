//! Email relay seam and the EmailJS request body.

use serde::Serialize;
use thiserror::Error;

use crate::config::EmailConfig;

/// Template parameters handed to the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailParams {
    pub from_name: String,
    pub from_email: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// The relay answered and refused the message.
    #[error("relay rejected the message (status {status}): {body}")]
    Rejected { status: u16, body: String },
    /// The request never got an answer: offline, DNS, CORS.
    #[error("relay unreachable: {0}")]
    Transport(String),
    /// A local fault before anything was sent.
    #[error("unexpected relay failure: {0}")]
    Unexpected(String),
}

/// Sends one contact message.
#[allow(async_fn_in_trait)]
pub trait EmailRelay {
    async fn send(&self, params: &EmailParams) -> Result<(), RelayError>;
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a EmailParams,
}

/// JSON body for the EmailJS `email/send` endpoint.
pub fn request_body(config: &EmailConfig, params: &EmailParams) -> Result<String, RelayError> {
    serde_json::to_string(&SendRequest {
        service_id: &config.service_id,
        template_id: &config.template_id,
        user_id: &config.public_key,
        template_params: params,
    })
    .map_err(|e| RelayError::Unexpected(e.to_string()))
}
