//! Server configuration.
//!
//! Non-secret settings come from a TOML file; secrets (API keys) come from
//! the environment and override anything in the file.

use serde::Deserialize;
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Payment processor settings.
    #[serde(default)]
    pub payment: PaymentConfig,
    /// Contact mail settings.
    #[serde(default)]
    pub mail: MailConfig,
    /// Newsletter settings.
    #[serde(default)]
    pub newsletter: NewsletterConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Payment processor settings.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PaymentConfig {
    /// Secret API key. Overridden by `SOUK_PAYMENT_KEY`.
    #[serde(default)]
    pub secret_key: String,
}

/// Contact mail settings.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct MailConfig {
    /// Sending domain.
    #[serde(default)]
    pub domain: String,
    /// Mailbox that receives contact-form submissions.
    #[serde(default)]
    pub contact_recipient: String,
    /// API key. Overridden by `SOUK_MAIL_KEY`.
    #[serde(default)]
    pub api_key: String,
}

/// Newsletter settings.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct NewsletterConfig {
    /// Audience list identifier.
    #[serde(default)]
    pub list_id: String,
    /// API key, `key-datacenter` form. Overridden by `SOUK_NEWSLETTER_KEY`.
    #[serde(default)]
    pub api_key: String,
}

impl Config {
    /// Load configuration from a TOML file and apply environment overrides.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read config {}: {}", path.display(), e))?;
        let mut config: Config = toml::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("cannot parse config {}: {}", path.display(), e))?;
        config.apply_env();
        Ok(config)
    }

    /// Defaults plus environment overrides, for running without a file.
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("SOUK_PAYMENT_KEY") {
            self.payment.secret_key = key;
        }
        if let Ok(key) = std::env::var("SOUK_MAIL_KEY") {
            self.mail.api_key = key;
        }
        if let Ok(key) = std::env::var("SOUK_NEWSLETTER_KEY") {
            self.newsletter.api_key = key;
        }
    }

    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_parse_toml() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 8080

            [mail]
            domain = "mail.example.com"
            contact_recipient = "hello@example.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.mail.domain, "mail.example.com");
    }
}
