//! Stripe charge client.

use super::{ChargeReceipt, CollaboratorError, PaymentClient};
use crate::config::PaymentConfig;
use reqwest::Client;
use serde::Deserialize;

const CHARGES_URL: &str = "https://api.stripe.com/v1/charges";

/// Charges cards through the Stripe charges API.
pub struct StripeChargeClient {
    client: Client,
    secret_key: String,
}

#[derive(Deserialize)]
struct ChargeResponse {
    id: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl StripeChargeClient {
    pub fn new(config: &PaymentConfig) -> Self {
        Self {
            client: Client::new(),
            secret_key: config.secret_key.clone(),
        }
    }
}

#[async_trait::async_trait]
impl PaymentClient for StripeChargeClient {
    async fn charge(
        &self,
        amount_minor: i64,
        currency_code: &str,
        token: &str,
        description: &str,
    ) -> Result<ChargeReceipt, CollaboratorError> {
        let params = [
            ("amount", amount_minor.to_string()),
            ("currency", currency_code.to_lowercase()),
            ("source", token.to_string()),
            ("description", description.to_string()),
        ];

        let response = self
            .client
            .post(CHARGES_URL)
            .bearer_auth(&self.secret_key)
            .form(&params)
            .send()
            .await?;

        if response.status().is_success() {
            let charge: ChargeResponse = response.json().await?;
            return Ok(ChargeReceipt {
                reference: charge.id,
            });
        }

        // Card errors come back as 402 with a message; treat any 4xx as a
        // decline so the customer sees the processor's reason.
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if status.is_client_error() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| status.to_string());
            return Err(CollaboratorError::ChargeDeclined(message));
        }
        Err(CollaboratorError::Request(format!("{}: {}", status, body)))
    }
}
