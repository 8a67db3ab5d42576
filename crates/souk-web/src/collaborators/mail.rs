//! Mailgun contact mail client.

use super::{CollaboratorError, ContactMessage, MailClient};
use crate::config::MailConfig;
use reqwest::Client;

/// Forwards contact submissions through the Mailgun messages API.
pub struct MailgunClient {
    client: Client,
    api_key: String,
    domain: String,
    recipient: String,
}

impl MailgunClient {
    pub fn new(config: &MailConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            domain: config.domain.clone(),
            recipient: config.contact_recipient.clone(),
        }
    }

    fn messages_url(&self) -> String {
        format!("https://api.mailgun.net/v3/{}/messages", self.domain)
    }
}

#[async_trait::async_trait]
impl MailClient for MailgunClient {
    async fn send_contact(&self, message: ContactMessage) -> Result<(), CollaboratorError> {
        let from = format!("{} <postmaster@{}>", message.name, self.domain);
        let params = [
            ("from", from.as_str()),
            ("to", self.recipient.as_str()),
            ("subject", "New contact form submission"),
            ("h:Reply-To", message.email.as_str()),
            ("text", message.message.as_str()),
        ];

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth("api", Some(&self.api_key))
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CollaboratorError::Request(format!("{}: {}", status, body)));
        }
        Ok(())
    }
}
