pub use crate::config::authority::AuthorityConfig;
pub use crate::config::oauth::OAuthConfig;
use confique::Config;

pub mod authority;
pub mod oauth;

/// Main configuration structure for the consent app
#[derive(Debug, Config, Clone)]
pub struct ServerConfig {
    /// The port the consent app will listen to (default: 3000)
    #[config(env = "PORT", default = 3000)]
    pub port: u16,

    /// Token provider (OAuth2 client-credentials) configuration
    #[config(nested)]
    pub oauth: OAuthConfig,

    /// Consent authority configuration
    #[config(nested)]
    pub authority: AuthorityConfig,
}

impl ServerConfig {
    /// Loads the configuration from environment variables, once at startup.
    /// Missing required variables (CLIENT_ID, CLIENT_SECRET, TOKEN_ENDPOINT,
    /// CONSENT_ENDPOINT) fail the load.
    pub fn load() -> Result<Self, confique::Error> {
        Self::builder().env().load()
    }

    #[cfg(test)]
    pub fn for_test_with_mocks(
        token_mock: &wiremock::MockServer,
        authority_mock: &wiremock::MockServer,
    ) -> Self {
        Self {
            port: 0, // Let the OS choose a port
            oauth: OAuthConfig {
                client_id: "test-client".to_string(),
                client_secret: "test-secret".to_string(),
                token_endpoint: format!("{}/oauth2/token", token_mock.uri()),
                scopes: "hydra.consent".to_string(),
                token_timeout: 1,
                tls_verify: true,
            },
            authority: AuthorityConfig {
                consent_endpoint: format!("{}/consents/", authority_mock.uri()),
                request_timeout: 5,
            },
        }
    }
}
