/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::config::START_INDEX_PLACEHOLDER;
use crate::v2::errors::{MappingError, PicasaError};
use crate::v2::feed::FeedDocument;
use crate::v2::{Album, Client};
use serde::Serialize;

/// Account information, taken from the head of the user's album feed
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct User {
    #[serde(rename = "ID")]
    pub id: String,

    #[serde(rename = "Nickname")]
    pub nickname: String,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "URI")]
    pub uri: String,

    #[serde(rename = "Thumbnail")]
    pub thumbnail: String,
}

impl User {
    /// Returns information for the specified user id. An empty id means the authenticated user.
    pub async fn from_id(client: &Client, user_id: &str) -> Result<User, PicasaError> {
        // Only the feed head is needed, so no entries are requested
        let listing = client
            .config()
            .album_listing(user_id)
            .replace(START_INDEX_PLACEHOLDER, "1");
        let mut req_url = url::Url::parse(&listing)?;
        req_url.query_pairs_mut().append_pair("max-results", "0");
        let feed = client.fetch_feed(req_url.as_str()).await?;
        Ok(Self::from_feed(&feed)?)
    }

    /// Returns information for the authenticated user
    pub async fn authenticated_user_info(client: &Client) -> Result<User, PicasaError> {
        Self::from_id(client, "").await
    }

    pub(crate) fn from_feed(feed: &FeedDocument) -> Result<User, MappingError> {
        if feed.user.is_empty() {
            return Err(MappingError::MissingId { kind: "User" });
        }
        Ok(Self {
            id: feed.user.clone(),
            nickname: feed.nickname.clone(),
            name: feed.author.name.clone(),
            uri: feed.author.uri.clone(),
            thumbnail: feed.thumbnail.clone(),
        })
    }

    /// Returns every album of this user
    pub async fn albums(&self, client: &Client) -> Result<Vec<Album>, PicasaError> {
        Album::list(client, &self.id).await
    }
}
