/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::errors::{MappingError, PicasaError};
use crate::v2::feed::{FEED_REL, FeedDocument, RawEntry};
use crate::v2::paginator::{CancelFlag, FeedEntity, Paginator};
use crate::v2::parsers::split_keywords;
use crate::v2::{Client, EntityKind, GeoPolicy, Photo};
use chrono::{DateTime, Utc};
use futures::Stream;
use serde::Serialize;

/// An album of a user.
///
/// See the [Picasa Web Albums Data API reference](https://developers.google.com/picasa-web/docs/3.0/reference)
/// for details on the individual fields.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Album {
    #[serde(rename = "ID")]
    pub id: String,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Summary")]
    pub summary: String,

    #[serde(rename = "Description")]
    pub description: String,

    #[serde(rename = "Location")]
    pub location: String,

    #[serde(rename = "AuthorName")]
    pub author_name: String,

    #[serde(rename = "AuthorURI")]
    pub author_uri: String,

    /// Comma separated keywords. Holds one empty string when the album has none.
    #[serde(rename = "Keywords")]
    pub keywords: Vec<String>,

    #[serde(rename = "Published")]
    pub published: Option<DateTime<Utc>>,

    #[serde(rename = "Updated")]
    pub updated: Option<DateTime<Utc>>,

    #[serde(rename = "NumPhotos", skip_serializing_if = "Option::is_none")]
    pub num_photos: Option<u64>,

    /// Feed of the album's photos, empty when the entry had no feed link
    #[serde(rename = "URL")]
    pub url: String,
}

impl Album {
    /// Pages through the albums of the user. An empty `user_id` means the authenticated user.
    pub fn pages(client: &Client, user_id: &str) -> Result<Paginator<Album>, PicasaError> {
        let template = client.config().album_listing(user_id);
        Ok(Paginator::new(client.clone(), template, client.page_size_query()))
    }

    /// Returns every album of the user
    pub async fn list(client: &Client, user_id: &str) -> Result<Vec<Album>, PicasaError> {
        Self::pages(client, user_id)?.collect_all(None).await
    }

    /// Returns every album of the user, checking `cancel` before each page
    pub async fn list_with_cancel(
        client: &Client,
        user_id: &str,
        cancel: &CancelFlag,
    ) -> Result<Vec<Album>, PicasaError> {
        Self::pages(client, user_id)?.collect_all(Some(cancel)).await
    }

    /// Streams the albums of the user a page at a time
    pub fn stream(
        client: &Client,
        user_id: &str,
    ) -> Result<impl Stream<Item = Result<Vec<Album>, PicasaError>>, PicasaError> {
        Ok(Self::pages(client, user_id)?.into_stream())
    }

    /// Returns every photo of this album
    pub async fn photos(&self, client: &Client, user_id: &str) -> Result<Vec<Photo>, PicasaError> {
        Photo::list(client, user_id, &self.id).await
    }
}

impl FeedEntity for Album {
    const KIND: EntityKind = EntityKind::Album;

    fn from_entry(entry: &RawEntry, _policy: GeoPolicy) -> Result<Self, MappingError> {
        let id = entry.id.clone().ok_or(MappingError::MissingId {
            kind: Self::KIND.into(),
        })?;
        Ok(Self {
            id,
            name: entry.name.clone(),
            title: media_or_atom_title(entry),
            summary: entry.summary.clone(),
            description: entry.media.description.clone(),
            location: entry.location.clone(),
            author_name: entry.author.name.clone(),
            author_uri: entry.author.uri.clone(),
            keywords: split_keywords(&entry.media.keywords),
            published: entry.published,
            updated: entry.updated,
            num_photos: entry.num_photos,
            url: entry.link(FEED_REL).unwrap_or_default().to_string(),
        })
    }

    fn reported_total(feed: &FeedDocument) -> Option<u64> {
        feed.total_results
    }
}

// The media title is preferred, the atom title fills in when it is blank
pub(crate) fn media_or_atom_title(entry: &RawEntry) -> String {
    if entry.media.title.is_empty() {
        entry.title.clone()
    } else {
        entry.media.title.clone()
    }
}
