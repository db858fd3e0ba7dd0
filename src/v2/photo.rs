/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::album::media_or_atom_title;
use crate::v2::errors::{MappingError, PicasaError};
use crate::v2::feed::{FeedDocument, RawEntry, decode_entry};
use crate::v2::paginator::{CancelFlag, FeedEntity, Paginator};
use crate::v2::parsers::{parse_position, split_keywords};
use crate::v2::upload::{PhotoUpload, multipart_headers};
use crate::v2::{Client, EntityKind, GeoPolicy, PhotoDownload};
use chrono::{DateTime, Utc};
use futures::Stream;
use serde::Serialize;

/// A photo inside an album.
///
/// See the [Picasa Web Albums Data API reference](https://developers.google.com/picasa-web/docs/3.0/reference)
/// for details on the individual fields.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Photo {
    #[serde(rename = "ID")]
    pub id: String,

    #[serde(rename = "AlbumID")]
    pub album_id: String,

    #[serde(rename = "ExifUID")]
    pub exif_uid: String,

    /// The file name the photo was uploaded with
    #[serde(rename = "Filename")]
    pub filename: String,

    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Summary")]
    pub summary: String,

    #[serde(rename = "Description")]
    pub description: String,

    #[serde(rename = "Location")]
    pub location: String,

    #[serde(rename = "Keywords")]
    pub keywords: Vec<String>,

    #[serde(rename = "Published")]
    pub published: Option<DateTime<Utc>>,

    #[serde(rename = "Updated")]
    pub updated: Option<DateTime<Utc>>,

    #[serde(rename = "Latitude")]
    pub latitude: f64,

    #[serde(rename = "Longitude")]
    pub longitude: f64,

    #[serde(rename = "Width", skip_serializing_if = "Option::is_none")]
    pub width: Option<u64>,

    #[serde(rename = "Height", skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,

    #[serde(rename = "Size", skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Where the image bytes are downloaded from
    #[serde(rename = "URL")]
    pub url: String,

    #[serde(rename = "Type")]
    pub mime_type: String,
}

/// Filters applied to a photo listing
#[derive(Debug, Default, Clone, PartialEq)]
pub struct QueryParams {
    pub bbox: Option<BoundingBox>,
    pub location: String,
    pub text: String,
    pub tag: String,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl std::str::FromStr for BoundingBox {
    type Err = PicasaError;

    /// Parses "west,south,east,north"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| PicasaError::InvalidField {
            field: "bbox",
            value: s.to_string(),
            reason,
        };
        let coords = s
            .split(',')
            .map(|v| v.trim().parse::<f64>().map_err(|err| invalid(err.to_string())))
            .collect::<Result<Vec<_>, _>>()?;
        match coords[..] {
            [west, south, east, north] => Ok(Self {
                west,
                south,
                east,
                north,
            }),
            _ => Err(invalid(format!("expected 4 coordinates, found {}", coords.len()))),
        }
    }
}

impl QueryParams {
    pub(crate) fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(b) = &self.bbox {
            pairs.push((
                "bbox".to_string(),
                format!("{},{},{},{}", b.west, b.south, b.east, b.north),
            ));
        }
        for (key, value) in [("l", &self.location), ("q", &self.text), ("tag", &self.tag)] {
            if !value.is_empty() {
                pairs.push((key.to_string(), value.clone()));
            }
        }
        pairs
    }
}

impl Photo {
    /// Pages through the photos of an album. Empty ids mean the authenticated user and their
    /// default album.
    pub fn pages(
        client: &Client,
        user_id: &str,
        album_id: &str,
        query: &QueryParams,
    ) -> Result<Paginator<Photo>, PicasaError> {
        let template = client.config().photo_listing(user_id, album_id);
        let mut pairs = client.page_size_query();
        pairs.extend(query.to_pairs());
        Ok(Paginator::new(client.clone(), template, pairs))
    }

    /// Returns every photo of the album
    pub async fn list(
        client: &Client,
        user_id: &str,
        album_id: &str,
    ) -> Result<Vec<Photo>, PicasaError> {
        Self::list_with_query(client, user_id, album_id, &QueryParams::default(), None).await
    }

    /// Returns every photo of the album matching `query`, checking `cancel` before each page
    pub async fn list_with_query(
        client: &Client,
        user_id: &str,
        album_id: &str,
        query: &QueryParams,
        cancel: Option<&CancelFlag>,
    ) -> Result<Vec<Photo>, PicasaError> {
        Self::pages(client, user_id, album_id, query)?
            .collect_all(cancel)
            .await
    }

    /// Streams the photos of the album a page at a time
    pub fn stream(
        client: &Client,
        user_id: &str,
        album_id: &str,
        query: &QueryParams,
    ) -> Result<impl Stream<Item = Result<Vec<Photo>, PicasaError>>, PicasaError> {
        Ok(Self::pages(client, user_id, album_id, query)?.into_stream())
    }

    /// Opens the image bytes at `url` for reading
    pub async fn download_url(client: &Client, url: &str) -> Result<PhotoDownload, PicasaError> {
        let resp = client.api_client().get(url).await?;
        Ok(PhotoDownload::new(url, resp))
    }

    /// Opens the image bytes of this photo for reading
    pub async fn download(&self, client: &Client) -> Result<PhotoDownload, PicasaError> {
        Self::download_url(client, &self.url).await
    }

    /// Uploads a new photo and returns it as the server stored it
    pub async fn upload(client: &Client, upload: &PhotoUpload<'_>) -> Result<Photo, PicasaError> {
        let url = client.config().upload_url(upload.user_id, upload.album_id);
        let body = upload.multipart_body();
        let resp = client
            .api_client()
            .post(&url, multipart_headers(body.len()), body)
            .await?;
        client.debug_tee().capture(&url, &resp)?;
        let entry = decode_entry(&resp)?;
        Ok(Self::from_entry(&entry, client.config().geo_policy)?)
    }
}

impl FeedEntity for Photo {
    const KIND: EntityKind = EntityKind::Photo;

    fn from_entry(entry: &RawEntry, policy: GeoPolicy) -> Result<Self, MappingError> {
        let id = entry.id.clone().ok_or(MappingError::MissingId {
            kind: Self::KIND.into(),
        })?;
        let (latitude, longitude) = parse_position(&id, &entry.position);
        if policy == GeoPolicy::Strict
            && !entry.position.is_empty()
            && latitude == 0.0
            && longitude == 0.0
        {
            return Err(MappingError::ZeroPosition {
                id,
                position: entry.position.clone(),
            });
        }
        let content = entry.resolved_content();
        Ok(Self {
            id,
            album_id: entry.album_id.clone(),
            exif_uid: entry.exif_uid.clone(),
            filename: entry.title.clone(),
            title: media_or_atom_title(entry),
            summary: entry.summary.clone(),
            description: entry.media.description.clone(),
            location: entry.location.clone(),
            keywords: split_keywords(&entry.media.keywords),
            published: entry.published,
            updated: entry.updated,
            latitude,
            longitude,
            width: entry.width,
            height: entry.height,
            size: entry.size,
            url: content.url.clone(),
            mime_type: content.mime_type.clone(),
        })
    }

    // The album's own photo count, falling back to the search total
    fn reported_total(feed: &FeedDocument) -> Option<u64> {
        feed.num_photos.or(feed.total_results)
    }
}
