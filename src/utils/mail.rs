use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::MailConfig;
use crate::types::mail::SendEmail;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("build client failed: {0}")]
    Client(String),
    #[error("send failed: {0}")]
    Transport(String),
    #[error("mail provider returned HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Outbound email. Implementations only promise to hand the message to a provider.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: SendEmail) -> Result<(), MailError>;
}

/// Mailer backed by a Resend compatible HTTP API.
pub struct ResendMailer {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl ResendMailer {
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let client = ClientBuilder::new()
            .user_agent(concat!("onboard-api/", env!("CARGO_PKG_VERSION")))
            .tcp_nodelay(true)
            .pool_idle_timeout(Duration::from_secs(30))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| MailError::Client(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: SendEmail) -> Result<(), MailError> {
        debug!(endpoint = %self.endpoint, to = ?email.to, subject = %email.subject, "sending email");

        let t0 = Instant::now();
        let res = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key) // never logged
            .json(&email)
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| MailError::Transport(format!("read body failed: {e}")))?;
        let elapsed_ms = t0.elapsed().as_millis();

        if status.is_success() {
            info!(%status, elapsed_ms, "email accepted by provider");
            Ok(())
        } else {
            warn!(%status, elapsed_ms, "email rejected by provider");
            Err(MailError::Rejected { status: status.as_u16(), body })
        }
    }
}

/// Link the invitee follows to redeem an invitation.
pub fn invitation_link(client_url: &str, token: &str) -> String {
    format!("{}/register?token={token}", client_url.trim_end_matches('/'))
}

pub fn invitation_email(sender: &str, to: &str, link: &str) -> SendEmail {
    SendEmail::text(
        sender,
        to,
        "Invitation to Join",
        format!("Please click the link to join: {link}"),
    )
}
