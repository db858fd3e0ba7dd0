/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::api::{ApiClient, TokenSource};
use crate::v2::config::ClientConfig;
use crate::v2::debug_tee::DebugTee;
use crate::v2::errors::PicasaError;
use crate::v2::feed::{FeedDocument, decode_feed};
use std::sync::Arc;

/// Handle shared by every operation. Cloning is cheap.
///
/// ```rust,no_run
/// use picasa::v2::{Album, Client, ClientConfig, Creds};
///
/// # async fn run() -> Result<(), picasa::v2::PicasaError> {
/// let client = Client::with_config(
///     Creds::from_access_token("ya29.token"),
///     ClientConfig::default().with_debug_dir("/tmp/picasa"),
/// )?;
/// let albums = Album::list(&client, "").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    api_client: Arc<ApiClient>,
    config: Arc<ClientConfig>,
    tee: DebugTee,
}

impl Client {
    /// Creates a client with the default configuration
    pub fn new(tokens: impl TokenSource + 'static) -> Result<Self, PicasaError> {
        Self::with_config(tokens, ClientConfig::default())
    }

    pub fn with_config(
        tokens: impl TokenSource + 'static,
        config: ClientConfig,
    ) -> Result<Self, PicasaError> {
        let api_client = ApiClient::new(tokens, &config.user_agent)?;
        Self::from_api_client(api_client, config)
    }

    /// Wraps an existing API client, for callers that set up their own HTTP stack
    pub fn from_api_client(api_client: ApiClient, config: ClientConfig) -> Result<Self, PicasaError> {
        config.validate()?;
        Ok(Self {
            api_client: Arc::new(api_client),
            tee: DebugTee::new(config.debug_dir.clone()),
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api_client(&self) -> &ApiClient {
        &self.api_client
    }

    pub fn debug_tee(&self) -> &DebugTee {
        &self.tee
    }

    /// Fetches and decodes one feed page. The raw body is captured first when debugging is on.
    pub async fn fetch_feed(&self, url: &str) -> Result<FeedDocument, PicasaError> {
        let body = self.api_client.get_bytes(url).await?;
        self.tee.capture(url, &body)?;
        decode_feed(&body)
    }

    pub(crate) fn page_size_query(&self) -> Vec<(String, String)> {
        self.config
            .max_results
            .map(|n| vec![("max-results".to_string(), n.to_string())])
            .unwrap_or_default()
    }
}
