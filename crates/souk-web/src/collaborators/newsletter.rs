//! Mailchimp newsletter client.

use super::{CollaboratorError, NewsletterClient};
use crate::config::NewsletterConfig;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

/// Subscribes addresses to a Mailchimp audience list.
pub struct MailchimpClient {
    client: Client,
    api_key: String,
    list_id: String,
    datacenter: String,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    title: String,
}

impl MailchimpClient {
    pub fn new(config: &NewsletterConfig) -> Self {
        // Keys are of the form `xxxx-us21`; the suffix names the API host.
        let datacenter = config
            .api_key
            .rsplit('-')
            .next()
            .unwrap_or("us1")
            .to_string();
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            list_id: config.list_id.clone(),
            datacenter,
        }
    }

    fn members_url(&self) -> String {
        format!(
            "https://{}.api.mailchimp.com/3.0/lists/{}/members",
            self.datacenter, self.list_id
        )
    }
}

#[async_trait::async_trait]
impl NewsletterClient for MailchimpClient {
    async fn subscribe(&self, email: &str) -> Result<(), CollaboratorError> {
        let body = json!({
            "email_address": email,
            "status": "subscribed",
        });

        let response = self
            .client
            .post(self.members_url())
            .basic_auth("anystring", Some(&self.api_key))
            .json(&body)
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let title = serde_json::from_str::<ApiError>(&text)
            .map(|e| e.title)
            .unwrap_or_default();
        if title == "Member Exists" {
            return Err(CollaboratorError::AlreadySubscribed(email.to_string()));
        }
        Err(CollaboratorError::Request(format!("{}: {}", status, text)))
    }
}
