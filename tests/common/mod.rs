//! Shared fixtures for integration tests.

use figment::providers::{Format, Yaml};
use figment::Figment;
use serde::Deserialize;
use validator::Validate;

/// Bound from the section named after the type.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerOptions {
    pub host: String,
    pub port: u16,
}

/// Every field defaulted, so an absent section still binds.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RetryOptions {
    #[serde(default = "default_attempts")]
    pub attempts: u32,
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

fn default_attempts() -> u32 {
    3
}

fn default_backoff_ms() -> u64 {
    250
}

/// Schema-validated fixture.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LimitsOptions {
    #[validate(range(min = 1, max = 64))]
    pub workers: u32,
}

/// Bound from the full root, typically environment-backed.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EndpointOptions {
    pub endpoint: String,
}

pub fn yaml_root(source: &str) -> Figment {
    Figment::new().merge(Yaml::string(source))
}
