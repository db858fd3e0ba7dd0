/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::errors::PicasaError;
use strum_macros::{Display, EnumString, IntoStaticStr};

/// Content types accepted for an upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, Display)]
pub enum ImageMime {
    #[strum(serialize = "image/bmp")]
    Bmp,
    #[strum(serialize = "image/gif")]
    Gif,
    #[strum(to_string = "image/jpeg", serialize = "image/jpg")]
    Jpeg,
    #[strum(serialize = "image/png")]
    Png,
}

impl ImageMime {
    /// Content-Type header value
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Parses a Content-Type value, rejecting types the upload endpoint does not take
    pub fn from_content_type(value: &str) -> Result<Self, PicasaError> {
        value
            .trim()
            .parse()
            .map_err(|_| PicasaError::InvalidMimeType(value.to_string()))
    }

    /// Guesses the content type from a file name extension
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "bmp" => Some(Self::Bmp),
            "gif" => Some(Self::Gif),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }
}

/// How a photo position that parses to exactly 0,0 is treated
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
pub enum GeoPolicy {
    /// Logged and kept as 0,0
    #[default]
    Lenient,
    /// Fails the mapping of the photo
    Strict,
}

/// The two kinds of entity a feed entry maps into
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, Display)]
pub enum EntityKind {
    Album,
    Photo,
}
