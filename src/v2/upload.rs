/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::ImageMime;
use quick_xml::escape::escape;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

/// Separates the parts of an upload body
pub const MULTIPART_BOUNDARY: &str = "_END_OF_PART_";

const PREAMBLE: &str = "Media multipart posting\r\n";
const PHOTO_KIND: &str = "http://schemas.google.com/photos/2007#photo";

/// A photo to upload.
///
/// Empty user and album ids mean the authenticated user and their default album.
#[derive(Debug, Clone)]
pub struct PhotoUpload<'a> {
    pub user_id: &'a str,
    pub album_id: &'a str,
    /// Becomes the photo title
    pub file_name: &'a str,
    /// Caption of the photo
    pub summary: &'a str,
    pub mime: ImageMime,
    pub data: &'a [u8],
}

impl<'a> PhotoUpload<'a> {
    /// Upload into the default album of the authenticated user
    pub fn new(file_name: &'a str, mime: ImageMime, data: &'a [u8]) -> Self {
        Self {
            user_id: "",
            album_id: "",
            file_name,
            summary: "",
            mime,
            data,
        }
    }

    pub fn to_album(mut self, user_id: &'a str, album_id: &'a str) -> Self {
        self.user_id = user_id;
        self.album_id = album_id;
        self
    }

    pub fn with_summary(mut self, summary: &'a str) -> Self {
        self.summary = summary;
        self
    }

    fn metadata(&self) -> String {
        format!(
            "<entry xmlns='http://www.w3.org/2005/Atom'><title>{}</title><summary>{}</summary>\
             <category scheme='http://schemas.google.com/g/2005#kind' term='{PHOTO_KIND}'/></entry>\r\n",
            escape(self.file_name),
            escape(self.summary),
        )
    }

    /// The multipart/related body: the atom metadata first, then the image bytes
    pub(crate) fn multipart_body(&self) -> Vec<u8> {
        let metadata = self.metadata();
        let mut body = Vec::with_capacity(self.data.len() + metadata.len() + 256);
        body.extend_from_slice(PREAMBLE.as_bytes());
        body.extend_from_slice(
            format!("--{MULTIPART_BOUNDARY}\r\nContent-Type: application/atom+xml\r\n\r\n")
                .as_bytes(),
        );
        body.extend_from_slice(metadata.as_bytes());
        body.extend_from_slice(
            format!(
                "\r\n--{MULTIPART_BOUNDARY}\r\nContent-Type: {}\r\n\r\n",
                self.mime.as_str()
            )
            .as_bytes(),
        );
        body.extend_from_slice(self.data);
        body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
        body
    }
}

/// Headers that go with a multipart body of `len` bytes
pub(crate) fn multipart_headers(len: usize) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static(r#"multipart/related; boundary="_END_OF_PART_""#),
    );
    headers.insert(CONTENT_LENGTH, HeaderValue::from(len));
    headers.insert(
        HeaderName::from_static("mime-version"),
        HeaderValue::from_static("1.0"),
    );
    headers
}
