/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::errors::PicasaError;
use log::trace;
use std::path::{Path, PathBuf};

const CAPTURE_EXTENSION: &str = "xml";

/// Copies raw response bodies into a capture directory.
///
/// Each body lands in a file named after the percent-encoded request URL. The bytes handed to
/// the decoder are never touched. A failed write fails the request.
#[derive(Debug, Clone, Default)]
pub struct DebugTee {
    dir: Option<PathBuf>,
}

impl DebugTee {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    pub fn is_enabled(&self) -> bool {
        self.dir.is_some()
    }

    /// File the body of a request to `url` is captured in, if capturing is on
    pub fn capture_path(&self, url: &str) -> Option<PathBuf> {
        self.dir.as_deref().map(|dir| capture_path(dir, url))
    }

    /// Writes `body` to the capture file for `url`
    pub fn capture(&self, url: &str, body: &[u8]) -> Result<(), PicasaError> {
        let Some(path) = self.capture_path(url) else {
            return Ok(());
        };
        trace!("capturing {} bytes of {url} to {path:?}", body.len());
        std::fs::write(&path, body).map_err(|source| PicasaError::DebugWrite { path, source })
    }
}

fn capture_path(dir: &Path, url: &str) -> PathBuf {
    dir.join(format!("{}.{CAPTURE_EXTENSION}", urlencoding::encode(url)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_tee_writes_nothing() {
        let tee = DebugTee::default();
        assert!(!tee.is_enabled());
        assert!(tee.capture_path("https://example.com").is_none());
        tee.capture("https://example.com", b"<feed/>").unwrap();
    }

    #[test]
    fn capture_file_is_named_by_escaped_url() {
        let tee = DebugTee::new(Some(PathBuf::from("/tmp/captures")));
        assert_eq!(
            tee.capture_path("https://h/feed?start-index=1").unwrap(),
            PathBuf::from("/tmp/captures/https%3A%2F%2Fh%2Ffeed%3Fstart-index%3D1.xml")
        );
    }

    #[test]
    fn capture_writes_exact_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let tee = DebugTee::new(Some(dir.path().to_path_buf()));
        let body = b"<feed>\r\n\xef\xbb\xbf</feed>";
        tee.capture("https://h/x", body).unwrap();
        let written = std::fs::read(tee.capture_path("https://h/x").unwrap()).unwrap();
        assert_eq!(written, body);
    }

    #[test]
    fn missing_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let tee = DebugTee::new(Some(dir.path().join("does-not-exist")));
        let err = tee.capture("https://h/x", b"x").unwrap_err();
        assert!(matches!(err, PicasaError::DebugWrite { .. }));
    }
}
