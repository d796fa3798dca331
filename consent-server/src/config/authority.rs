//! Consent authority configuration

use confique::Config;

/// Settings for calls to the consent authority
#[derive(Debug, Config, Clone)]
pub struct AuthorityConfig {
    /// Base URL for consent records; the consent ID is appended directly,
    /// so a trailing slash is usually wanted
    #[config(env = "CONSENT_ENDPOINT")]
    pub consent_endpoint: String,

    /// Timeout for authority requests in seconds (default: 30)
    #[config(env = "AUTHORITY_TIMEOUT", default = 30)]
    pub request_timeout: u64,
}

impl AuthorityConfig {
    /// URL of a single consent record
    pub fn consent_url(&self, id: &str) -> String {
        format!("{}{}", self.consent_endpoint, id)
    }

    /// URL of the accept operation for a consent record
    pub fn accept_url(&self, id: &str) -> String {
        format!("{}{}/accept", self.consent_endpoint, id)
    }
}
