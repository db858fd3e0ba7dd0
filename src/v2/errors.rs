/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error conditions that can be returned
#[derive(Error, Debug)]
pub enum PicasaError {
    #[error("I/O error")]
    Io(#[from] io::Error),

    #[error("Request network error")]
    Request(#[from] reqwest::Error),

    #[error("Authorization error. {0}")]
    Auth(String),

    #[error("URL Parse error")]
    UrlParsing(#[from] url::ParseError),

    #[error("{method} {url} returned {status}\n{body}")]
    Remote {
        method: &'static str,
        url: String,
        status: u16,
        body: String,
    },

    #[error("Feed is malformed: {context}")]
    Decode {
        context: String,
        #[source]
        source: Option<quick_xml::Error>,
    },

    #[error("Field {field} has invalid value {value:?}: {reason}")]
    InvalidField {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error("Failed writing debug capture {path:?}")]
    DebugWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unsupported upload content type: {0}")]
    InvalidMimeType(String),

    #[error("Traversal cancelled after {accumulated} entries")]
    Cancelled { accumulated: usize },
}

impl PicasaError {
    /// True if the server answered with an error status
    pub fn is_remote(&self) -> bool {
        matches!(self, PicasaError::Remote { .. })
    }

    /// True if a response body could not be decoded as a feed
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            PicasaError::Decode { .. } | PicasaError::InvalidField { .. }
        )
    }

    /// Status code of a [`PicasaError::Remote`] error
    pub fn status(&self) -> Option<u16> {
        match self {
            PicasaError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure converting a feed entry into an [`crate::v2::Album`] or [`crate::v2::Photo`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MappingError {
    #[error("{kind} entry has no id")]
    MissingId { kind: &'static str },

    #[error("Photo {id} has position {position:?} that parsed to 0,0")]
    ZeroPosition { id: String, position: String },
}
