/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::errors::PicasaError;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use std::io::Write;

/// An open image body.
///
/// The connection is held until the value is consumed or dropped.
#[derive(Debug)]
pub struct PhotoDownload {
    url: String,
    response: reqwest::Response,
}

impl PhotoDownload {
    pub(crate) fn new(url: &str, response: reqwest::Response) -> Self {
        Self {
            url: url.to_string(),
            response,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn content_type(&self) -> Option<&str> {
        self.response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    pub fn content_length(&self) -> Option<u64> {
        self.response.content_length()
    }

    /// Reads the next chunk of the body, `None` at the end
    pub async fn next_chunk(&mut self) -> Result<Option<Bytes>, PicasaError> {
        Ok(self.response.chunk().await?)
    }

    /// Reads the remaining body into memory
    pub async fn bytes(self) -> Result<Bytes, PicasaError> {
        Ok(self.response.bytes().await?)
    }

    /// Copies the remaining body into `writer` and returns the number of bytes written
    pub async fn copy_to<W: Write>(mut self, writer: &mut W) -> Result<u64, PicasaError> {
        let mut written = 0;
        while let Some(chunk) = self.next_chunk().await? {
            writer.write_all(&chunk)?;
            written += chunk.len() as u64;
        }
        writer.flush()?;
        Ok(written)
    }
}
