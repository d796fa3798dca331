use crate::config::ServerConfig;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub http: Arc<Client>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Result<Self, reqwest::Error> {
        let http = Self::create_http_client(&config)?;
        Ok(Self {
            config: Arc::new(config),
            http: Arc::new(http),
        })
    }

    /// Build the shared outbound HTTP client used for both the token
    /// endpoint and the consent authority
    fn create_http_client(config: &ServerConfig) -> Result<Client, reqwest::Error> {
        Client::builder()
            // Set reasonable timeouts
            .timeout(Duration::from_secs(config.authority.request_timeout))
            .connect_timeout(Duration::from_secs(2)) // 2 seconds timeout for connections
            // Certificate verification stays on unless explicitly disabled
            .danger_accept_invalid_certs(!config.oauth.tls_verify)
            // Configure connection pool
            .pool_max_idle_per_host(10) // Keep up to 10 idle connections per host
            .pool_idle_timeout(Some(Duration::from_secs(90))) // Keep idle connections for 90 seconds
            .build()
    }
}
