/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::errors::PicasaError;
use bytes::Bytes;
use log::debug;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use std::sync::Arc;

/// Protocol version header the Data API expects
const GDATA_VERSION: (&str, &str) = ("gdata-version", "2");

/// Supplies OAuth2 access tokens.
///
/// Obtaining and refreshing the token is up to the implementation; the client asks for a
/// token before every request.
pub trait TokenSource: Send + Sync {
    fn access_token(&self) -> Result<String, PicasaError>;
}

/// A fixed OAuth2 access token
#[derive(Default, Clone)]
pub struct Creds {
    access_token: String,
}

impl Creds {
    pub fn from_access_token(access_token: &str) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }
}

impl std::fmt::Debug for Creds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Creds")
            .field("access_token", &"xxx")
            .finish()
    }
}

impl TokenSource for Creds {
    fn access_token(&self) -> Result<String, PicasaError> {
        if self.access_token.is_empty() {
            return Err(PicasaError::Auth("access token is empty".to_string()));
        }
        Ok(self.access_token.clone())
    }
}

/// Directly communicates with the API. Every request carries the bearer token.
#[derive(Clone)]
pub struct ApiClient {
    tokens: Arc<dyn TokenSource>,
    https_client: reqwest::Client,
}

impl ApiClient {
    /// Creates a new client from a token source
    pub fn new(tokens: impl TokenSource + 'static, user_agent: &str) -> Result<Self, PicasaError> {
        let https_client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self::with_http_client(tokens, https_client))
    }

    /// Creates a new client around an already configured reqwest client
    pub fn with_http_client(tokens: impl TokenSource + 'static, https_client: reqwest::Client) -> Self {
        Self {
            tokens: Arc::new(tokens),
            https_client,
        }
    }

    fn auth_headers(&self) -> Result<HeaderMap, PicasaError> {
        let token = self.tokens.access_token()?;
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|err| PicasaError::Auth(err.to_string()))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(GDATA_VERSION.0, HeaderValue::from_static(GDATA_VERSION.1));
        Ok(headers)
    }

    /// Performs an authorized GET and returns the response once its status is known to be good.
    /// The body is left unread.
    pub async fn get(&self, url: &str) -> Result<reqwest::Response, PicasaError> {
        debug!("GET {url}");
        let resp = self
            .https_client
            .get(url)
            .headers(self.auth_headers()?)
            .send()
            .await?;
        check_status("GET", url, resp).await
    }

    /// Performs an authorized GET and reads the whole body
    pub async fn get_bytes(&self, url: &str) -> Result<Bytes, PicasaError> {
        Ok(self.get(url).await?.bytes().await?)
    }

    /// Performs an authorized POST with the extra headers and reads the whole response body
    pub async fn post(
        &self,
        url: &str,
        headers: HeaderMap,
        body: Vec<u8>,
    ) -> Result<Bytes, PicasaError> {
        debug!("POST {url} ({} bytes)", body.len());
        let resp = self
            .https_client
            .post(url)
            .headers(self.auth_headers()?)
            .headers(headers)
            .body(body)
            .send()
            .await?;
        Ok(check_status("POST", url, resp).await?.bytes().await?)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").finish()
    }
}

// Status 400 and above is an error. The body is drained into the error for diagnostics.
async fn check_status(
    method: &'static str,
    url: &str,
    resp: reqwest::Response,
) -> Result<reqwest::Response, PicasaError> {
    let status = resp.status();
    if status.as_u16() < 400 {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(PicasaError::Remote {
        method,
        url: url.to_string(),
        status: status.as_u16(),
        body,
    })
}
