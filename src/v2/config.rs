/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::errors::PicasaError;
use crate::v2::GeoPolicy;
use std::path::PathBuf;

/// Album listing of a user
pub const ALBUMS_URL_TEMPLATE: &str =
    "https://picasaweb.google.com/data/feed/api/user/{userID}?kind=album&start-index={startIndex}";

/// Photo listing of one album
pub const PHOTOS_URL_TEMPLATE: &str = "https://picasaweb.google.com/data/feed/api/user/{userID}/albumid/{albumID}?kind=photo&start-index={startIndex}";

/// Identifier standing for the authenticated user, or their default album
pub const DEFAULT_ID: &str = "default";

pub(crate) const USER_ID_PLACEHOLDER: &str = "{userID}";
pub(crate) const ALBUM_ID_PLACEHOLDER: &str = "{albumID}";
pub(crate) const START_INDEX_PLACEHOLDER: &str = "{startIndex}";

/// Settings fixed for the lifetime of a [`crate::v2::Client`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Must contain `{userID}` and `{startIndex}`
    pub album_url_template: String,
    /// Must contain `{userID}`, `{albumID}` and `{startIndex}`
    pub photo_url_template: String,
    pub user_agent: String,
    /// When set every feed response body is also written here
    pub debug_dir: Option<PathBuf>,
    pub geo_policy: GeoPolicy,
    /// Page size hint sent as `max-results`
    pub max_results: Option<u32>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            album_url_template: ALBUMS_URL_TEMPLATE.to_string(),
            photo_url_template: PHOTOS_URL_TEMPLATE.to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            debug_dir: None,
            geo_policy: GeoPolicy::default(),
            max_results: None,
        }
    }
}

impl ClientConfig {
    pub fn with_debug_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.debug_dir = Some(dir.into());
        self
    }

    pub fn with_geo_policy(mut self, policy: GeoPolicy) -> Self {
        self.geo_policy = policy;
        self
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Points both listings at another origin, keeping the default paths
    pub fn with_origin(mut self, origin: &str) -> Self {
        let origin = origin.trim_end_matches('/');
        self.album_url_template = ALBUMS_URL_TEMPLATE.replace("https://picasaweb.google.com", origin);
        self.photo_url_template = PHOTOS_URL_TEMPLATE.replace("https://picasaweb.google.com", origin);
        self
    }

    /// Checks that the templates carry the placeholders the paginator substitutes
    pub fn validate(&self) -> Result<(), PicasaError> {
        let required = [
            (
                "album_url_template",
                &self.album_url_template,
                &[USER_ID_PLACEHOLDER, START_INDEX_PLACEHOLDER][..],
            ),
            (
                "photo_url_template",
                &self.photo_url_template,
                &[USER_ID_PLACEHOLDER, ALBUM_ID_PLACEHOLDER, START_INDEX_PLACEHOLDER][..],
            ),
        ];
        for (field, template, placeholders) in required {
            if let Some(missing) = placeholders.iter().find(|p| !template.contains(*p)) {
                return Err(PicasaError::InvalidField {
                    field,
                    value: template.clone(),
                    reason: format!("missing placeholder {missing}"),
                });
            }
        }
        // Uploads post to the photo listing with its query cut off
        let upload_base = self
            .photo_url_template
            .rsplit_once('?')
            .map_or(self.photo_url_template.as_str(), |(base, _)| base);
        if upload_base.contains(START_INDEX_PLACEHOLDER) {
            return Err(PicasaError::InvalidField {
                field: "photo_url_template",
                value: self.photo_url_template.clone(),
                reason: format!("{START_INDEX_PLACEHOLDER} must be in the query string"),
            });
        }
        Ok(())
    }

    /// The album listing with the user substituted; `{startIndex}` is left in place
    pub(crate) fn album_listing(&self, user_id: &str) -> String {
        self.album_url_template.replace(USER_ID_PLACEHOLDER, &path_id(user_id))
    }

    /// The photo listing with user and album substituted; `{startIndex}` is left in place
    pub(crate) fn photo_listing(&self, user_id: &str, album_id: &str) -> String {
        self.photo_url_template
            .replace(USER_ID_PLACEHOLDER, &path_id(user_id))
            .replace(ALBUM_ID_PLACEHOLDER, &path_id(album_id))
    }

    /// Where new photos of the album are posted. The query, and with it pagination, is dropped.
    pub(crate) fn upload_url(&self, user_id: &str, album_id: &str) -> String {
        let listing = self.photo_listing(user_id, album_id);
        match listing.rsplit_once('?') {
            Some((base, _)) => base.to_string(),
            None => listing,
        }
    }
}

// An empty identifier means the authenticated user's own account or album
fn path_id(id: &str) -> String {
    if id.is_empty() {
        DEFAULT_ID.to_string()
    } else {
        urlencoding::encode(id).into_owned()
    }
}
