//! Outbound Mail Transport
//!
//! Delivers mail through an HTTP mail-API relay. Delivery is best-effort:
//! callers sit behind an asynchronous queue and treat failures as
//! non-fatal. A log-only transport is provided for development and test
//! environments with no relay configured.

use serde::Serialize;
use thiserror::Error;

/// A single outbound mail
#[derive(Debug, Clone, Serialize)]
pub struct Mail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mail delivery errors
#[derive(Debug, Error)]
pub enum MailerError {
    /// The relay could not be reached or returned a transport error
    #[error("Mail relay request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The relay answered with a non-success status
    #[error("Mail relay rejected the message with status {0}")]
    Rejected(u16),
}

/// Payload posted to the HTTP mail relay
#[derive(Serialize)]
struct RelayPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// Outbound mail transport
///
/// `HttpApi` posts the mail as JSON to a configured relay endpoint.
/// `Log` records the mail via tracing and reports success, which keeps
/// development environments working without a relay.
pub enum MailTransport {
    HttpApi {
        client: reqwest::Client,
        endpoint: String,
        from: String,
    },
    Log,
}

impl MailTransport {
    /// Create the HTTP relay transport
    pub fn http_api(endpoint: impl Into<String>, from: impl Into<String>) -> Self {
        Self::HttpApi {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            from: from.into(),
        }
    }

    /// Create the log-only transport
    pub fn log_only() -> Self {
        Self::Log
    }

    /// Deliver one mail
    pub async fn send(&self, mail: &Mail) -> Result<(), MailerError> {
        match self {
            Self::HttpApi {
                client,
                endpoint,
                from,
            } => {
                let payload = RelayPayload {
                    from,
                    to: &mail.to,
                    subject: &mail.subject,
                    text: &mail.body,
                };

                let response = client.post(endpoint).json(&payload).send().await?;

                if !response.status().is_success() {
                    return Err(MailerError::Rejected(response.status().as_u16()));
                }

                Ok(())
            }
            Self::Log => {
                tracing::info!(
                    to = %mail.to,
                    subject = %mail.subject,
                    "Mail delivered to log transport"
                );
                Ok(())
            }
        }
    }
}
