//! # Store Configuration
//!
//! Settings are read from an optional `config/storefront.toml` and then from
//! `STOREFRONT__*` environment variables, which win. Nested keys use a double
//! underscore: `STOREFRONT__PAYMENT__TIMEOUT_MS=2500`.
//!
//! Every field has a default, so an empty environment yields a working store.

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "config/storefront";

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Mailbox capacity of every actor.
    #[serde(default = "default_mailbox_size")]
    pub mailbox_size: usize,
    /// Used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub checkout: CheckoutConfig,
    #[serde(default)]
    pub payment: PaymentConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutConfig {
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Days added to the order date to get the delivery date.
    #[serde(default = "default_delivery_days")]
    pub delivery_days: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Public key id handed to the checkout page.
    #[serde(default = "default_key_id")]
    pub key_id: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Ask the gateway to confirm an online payment before the order is
    /// marked `Confirmed`.
    #[serde(default = "default_verify")]
    pub verify_online_payments: bool,
}

fn default_mailbox_size() -> usize {
    32
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_delivery_days() -> u32 {
    7
}

fn default_key_id() -> String {
    "rzp_test_homeguard".to_string()
}

fn default_timeout_ms() -> u64 {
    5_000
}

fn default_verify() -> bool {
    true
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            delivery_days: default_delivery_days(),
        }
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            key_id: default_key_id(),
            timeout_ms: default_timeout_ms(),
            verify_online_payments: default_verify(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            mailbox_size: default_mailbox_size(),
            log_level: default_log_level(),
            checkout: CheckoutConfig::default(),
            payment: PaymentConfig::default(),
        }
    }
}

impl StoreConfig {
    /// Loads `config/storefront.toml` (if present) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("STOREFRONT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Parses TOML text without consulting the environment.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    pub fn gateway_timeout(&self) -> Duration {
        Duration::from_millis(self.payment.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_gives_defaults() {
        let config = StoreConfig::from_toml("").unwrap();
        assert_eq!(config.mailbox_size, 32);
        assert_eq!(config.checkout.currency, "INR");
        assert_eq!(config.checkout.delivery_days, 7);
        assert!(config.payment.verify_online_payments);
        assert_eq!(config.gateway_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn nested_sections_override_defaults() {
        let config = StoreConfig::from_toml(
            r#"
            mailbox_size = 8

            [checkout]
            delivery_days = 3

            [payment]
            timeout_ms = 250
            verify_online_payments = false
            "#,
        )
        .unwrap();
        assert_eq!(config.mailbox_size, 8);
        assert_eq!(config.checkout.delivery_days, 3);
        assert_eq!(config.checkout.currency, "INR");
        assert_eq!(config.payment.timeout_ms, 250);
        assert!(!config.payment.verify_online_payments);
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let config = StoreConfig::load_from("config/does-not-exist").unwrap();
        assert!(config.mailbox_size > 0);
    }
}
