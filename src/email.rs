use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::notifications::EmailContent;

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    html: &'a str,
    reply_to: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

/// Client for the Resend `POST /emails` endpoint.
///
/// One attempt per message; failures are returned to the caller as-is.
#[derive(Debug, Clone)]
pub struct Mailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
    to: String,
}

impl Mailer {
    pub fn from_config(config: &Config, client: reqwest::Client) -> Self {
        Self {
            client,
            api_url: config.resend_api_url.clone(),
            api_key: config.resend_api_key.clone(),
            from: config.email_from.clone(),
            to: config.email_to.clone(),
        }
    }

    /// Send an email to the site team and return the provider's message id.
    pub async fn send(&self, content: &EmailContent) -> Result<String> {
        let url = format!("{}/emails", self.api_url);

        let request = SendEmailRequest {
            from: &self.from,
            to: vec![self.to.as_str()],
            subject: &content.subject,
            html: &content.html,
            reply_to: &content.reply_to,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Resend API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Resend API error ({}): {}", status, body);
        }

        let sent: SendEmailResponse = response
            .json()
            .await
            .context("Failed to parse Resend response")?;

        Ok(sent.id)
    }
}
