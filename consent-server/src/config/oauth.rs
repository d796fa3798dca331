//! Token provider (OAuth2 client-credentials) configuration

use confique::Config;

/// Settings for the client-credentials grant against the token endpoint
#[derive(Debug, Config, Clone)]
pub struct OAuthConfig {
    /// OAuth2 client identifier
    #[config(env = "CLIENT_ID")]
    pub client_id: String,

    /// OAuth2 client secret
    #[config(env = "CLIENT_SECRET")]
    pub client_secret: String,

    /// Token endpoint URL of the authority
    #[config(env = "TOKEN_ENDPOINT")]
    pub token_endpoint: String,

    /// Scopes requested with every token, comma-separated
    /// (default: "hydra.consent")
    #[config(env = "SCOPES", default = "hydra.consent")]
    pub scopes: String,

    /// Timeout for the token request in seconds (default: 1)
    #[config(env = "TOKEN_TIMEOUT", default = 1)]
    pub token_timeout: u64,

    /// Verify the authority's TLS certificate (default: true).
    /// Only disable for authorities with self-signed certificates.
    #[config(env = "TLS_VERIFY", default = true)]
    pub tls_verify: bool,
}

impl OAuthConfig {
    /// Get the configured scopes as a vector
    pub fn scope_list(&self) -> Vec<String> {
        self.scopes
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
