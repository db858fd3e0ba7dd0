/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Decoding of the Atom feeds returned by the Picasa Web Albums Data API.
//!
//! Only the subset of the feed the client maps is retained. Unknown elements are skipped and
//! missing ones are left at their defaults, so a feed without entries is perfectly valid.

use crate::v2::errors::PicasaError;
use crate::v2::parsers::{parse_count, parse_timestamp};
use chrono::{DateTime, Utc};
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;

const ATOM_NS: &[u8] = b"http://www.w3.org/2005/Atom";
const GPHOTO_NS: &[u8] = b"http://schemas.google.com/photos/2007";
const MEDIA_NS: &[u8] = b"http://search.yahoo.com/mrss/";
const EXIF_NS: &[u8] = b"http://schemas.google.com/photos/exif/2007";
const GEORSS_NS: &[u8] = b"http://www.georss.org/georss";
const GML_NS: &[u8] = b"http://www.opengis.net/gml";
const OPENSEARCH_NS: &[&[u8]] = &[
    b"http://a9.com/-/spec/opensearch/1.1/",
    b"http://a9.com/-/spec/opensearchrss/1.0/",
];

/// Link relation pointing at the feed of an album
pub const FEED_REL: &str = "http://schemas.google.com/g/2005#feed";

/// One decoded feed page
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FeedDocument {
    pub id: String,
    pub title: String,
    pub author: Author,
    pub total_results: Option<u64>,
    pub start_index: Option<u64>,
    pub items_per_page: Option<u64>,
    /// Photo count of the album a photo listing belongs to
    pub num_photos: Option<u64>,
    pub user: String,
    pub nickname: String,
    pub thumbnail: String,
    pub entries: Vec<RawEntry>,
}

/// One feed entry, before it is mapped into an [`crate::v2::Album`] or [`crate::v2::Photo`]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RawEntry {
    pub etag: String,
    /// The atom id, a URL
    pub entry_id: String,
    /// The gphoto id. This is the identity of the album or photo.
    pub id: Option<String>,
    pub album_id: String,
    pub name: String,
    pub published: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
    pub title: String,
    pub summary: String,
    pub links: Vec<Link>,
    pub author: Author,
    pub location: String,
    pub num_photos: Option<u64>,
    pub width: Option<u64>,
    pub height: Option<u64>,
    pub size: Option<u64>,
    pub content: ContentDescriptor,
    pub media: MediaGroup,
    pub exif_uid: String,
    /// georss position, "lat long"
    pub position: String,
}

impl RawEntry {
    /// Returns the href of the first link with the given relation
    pub fn link(&self, rel: &str) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.rel == rel)
            .map(|l| l.url.as_str())
    }

    /// The authoritative content descriptor. The atom content wins when it has a URL.
    pub fn resolved_content(&self) -> &ContentDescriptor {
        if self.content.url.is_empty() {
            &self.media.content
        } else {
            &self.content
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Link {
    pub rel: String,
    pub mime_type: String,
    pub url: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Author {
    pub name: String,
    pub uri: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct MediaGroup {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub content: ContentDescriptor,
}

/// A (URL, MIME type) pair identifying retrievable content
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ContentDescriptor {
    pub url: String,
    pub mime_type: String,
}

/// Decodes a feed document (root element `feed`)
pub fn decode_feed(data: &[u8]) -> Result<FeedDocument, PicasaError> {
    match decode(data)? {
        Root::Feed(feed) => Ok(feed),
        Root::Entry(_) => Err(malformed("expected a feed, found a lone entry")),
    }
}

/// Decodes a single entry document, as returned after an upload.
/// A feed wrapping exactly one entry is accepted as well.
pub fn decode_entry(data: &[u8]) -> Result<RawEntry, PicasaError> {
    match decode(data)? {
        Root::Entry(entry) => Ok(entry),
        Root::Feed(mut feed) if feed.entries.len() == 1 => Ok(feed.entries.remove(0)),
        Root::Feed(feed) => Err(malformed(format!(
            "expected one entry, found a feed with {}",
            feed.entries.len()
        ))),
    }
}

fn malformed(context: impl Into<String>) -> PicasaError {
    PicasaError::Decode {
        context: context.into(),
        source: None,
    }
}

fn xml_error(context: impl Into<String>, source: impl Into<quick_xml::Error>) -> PicasaError {
    PicasaError::Decode {
        context: context.into(),
        source: Some(source.into()),
    }
}

// Namespaces the decoder cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ns {
    Atom,
    GPhoto,
    Media,
    OpenSearch,
    Exif,
    GeoRss,
    Gml,
    Other,
}

impl Ns {
    fn classify(resolved: &ResolveResult) -> Ns {
        match resolved {
            // Undeclared default namespace is read as Atom
            ResolveResult::Unbound => Ns::Atom,
            ResolveResult::Bound(ns) => Self::from_uri(ns.as_ref()),
            // Undeclared prefix, fall back to the conventional prefix names
            ResolveResult::Unknown(prefix) => match prefix.as_slice() {
                b"gphoto" => Ns::GPhoto,
                b"media" => Ns::Media,
                b"openSearch" => Ns::OpenSearch,
                b"exif" => Ns::Exif,
                b"georss" => Ns::GeoRss,
                b"gml" => Ns::Gml,
                _ => Ns::Other,
            },
        }
    }

    fn from_uri(uri: &[u8]) -> Ns {
        match uri {
            ATOM_NS => Ns::Atom,
            GPHOTO_NS => Ns::GPhoto,
            MEDIA_NS => Ns::Media,
            EXIF_NS => Ns::Exif,
            GEORSS_NS => Ns::GeoRss,
            GML_NS => Ns::Gml,
            _ if OPENSEARCH_NS.contains(&uri) => Ns::OpenSearch,
            _ => Ns::Other,
        }
    }
}

#[derive(Debug)]
struct Element {
    ns: Ns,
    name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RootKind {
    Feed,
    Entry,
}

enum Root {
    Feed(FeedDocument),
    Entry(RawEntry),
}

#[derive(Default)]
struct Decoder {
    stack: Vec<Element>,
    text: String,
    root: Option<RootKind>,
    // Set once the root element has closed. Anything after it is ignored.
    finished: bool,
    feed: FeedDocument,
    // Stack depth of the open entry element
    entry_depth: Option<usize>,
    entry: RawEntry,
}

fn decode(data: &[u8]) -> Result<Root, PicasaError> {
    let mut reader = NsReader::from_reader(data);
    let mut buf = Vec::new();
    let mut decoder = Decoder::default();

    loop {
        let (resolved, event) = reader
            .read_resolved_event_into(&mut buf)
            .map_err(|err| xml_error("invalid XML", err))?;
        let ns = Ns::classify(&resolved);
        let at = || format!("at byte {}", reader.buffer_position());
        match event {
            Event::Start(e) => decoder.open(ns, &e)?,
            Event::Empty(e) => {
                decoder.open(ns, &e)?;
                decoder.close()?;
            }
            Event::End(_) => decoder.close()?,
            Event::Text(e) => {
                let text = e.decode().map_err(|err| xml_error(at(), err))?;
                decoder.text.push_str(&text);
            }
            Event::CData(e) => {
                let text = e.decode().map_err(|err| xml_error(at(), err))?;
                decoder.text.push_str(&text);
            }
            Event::GeneralRef(e) => {
                if let Some(ch) = e.resolve_char_ref().map_err(|err| xml_error(at(), err))? {
                    decoder.text.push(ch);
                } else {
                    let name = e.decode().map_err(|err| xml_error(at(), err))?;
                    let resolved = resolve_predefined_entity(&name)
                        .ok_or_else(|| malformed(format!("unknown entity &{name}; {}", at())))?;
                    decoder.text.push_str(resolved);
                }
            }
            Event::Eof => break,
            _ => (),
        }
        buf.clear();
    }

    match decoder.root {
        None => Err(malformed("document has no root element")),
        Some(_) if !decoder.finished => Err(malformed("document ended inside an element")),
        Some(RootKind::Entry) => Ok(Root::Entry(decoder.entry)),
        Some(RootKind::Feed) => Ok(Root::Feed(decoder.feed)),
    }
}

fn attr_value(e: &BytesStart, key: &[u8]) -> Result<Option<String>, PicasaError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| xml_error("invalid attribute", err))?;
        if attr.key.local_name().as_ref() == key {
            let value = attr
                .unescape_value()
                .map_err(|err| xml_error("invalid attribute value", err))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

impl Decoder {
    fn open(&mut self, ns: Ns, e: &BytesStart) -> Result<(), PicasaError> {
        let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
        self.text.clear();

        if self.finished {
            self.stack.push(Element { ns, name });
            return Ok(());
        }

        let depth = self.stack.len();
        if depth == 0 {
            self.root = match (ns, name.as_str()) {
                (Ns::Atom, "feed") => Some(RootKind::Feed),
                (Ns::Atom, "entry") => Some(RootKind::Entry),
                _ => return Err(malformed(format!("unexpected root element <{name}>"))),
            };
        }

        let starts_entry = ns == Ns::Atom
            && name == "entry"
            && self.entry_depth.is_none()
            && (depth == 0 || (depth == 1 && self.root == Some(RootKind::Feed)));
        if starts_entry {
            self.entry = RawEntry::default();
            self.entry_depth = Some(depth);
            if let Some(etag) = attr_value(e, b"etag")? {
                self.entry.etag = etag;
            }
        } else if let Some(entry_depth) = self.entry_depth {
            self.entry_attributes(depth - entry_depth, ns, &name, e)?;
        }

        self.stack.push(Element { ns, name });
        Ok(())
    }

    // Picks up the attribute-carried fields of an entry. `rel_depth` is the depth below the entry.
    fn entry_attributes(
        &mut self,
        rel_depth: usize,
        ns: Ns,
        name: &str,
        e: &BytesStart,
    ) -> Result<(), PicasaError> {
        let parent = self.stack.last().map(|p| (p.ns, p.name.as_str()));
        match (rel_depth, ns, name, parent) {
            (1, Ns::Atom, "link", _) => self.entry.links.push(Link {
                rel: attr_value(e, b"rel")?.unwrap_or_default(),
                mime_type: attr_value(e, b"type")?.unwrap_or_default(),
                url: attr_value(e, b"href")?.unwrap_or_default(),
            }),
            (1, Ns::Atom, "content", _) => {
                self.entry.content = ContentDescriptor {
                    url: attr_value(e, b"src")?.unwrap_or_default(),
                    mime_type: attr_value(e, b"type")?.unwrap_or_default(),
                }
            }
            // Only the first media:content of the group counts
            (2, Ns::Media, "content", Some((Ns::Media, "group")))
                if self.entry.media.content.url.is_empty() =>
            {
                self.entry.media.content = ContentDescriptor {
                    url: attr_value(e, b"url")?.unwrap_or_default(),
                    mime_type: attr_value(e, b"type")?.unwrap_or_default(),
                }
            }
            _ => (),
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), PicasaError> {
        let Some(closed) = self.stack.pop() else {
            return Err(malformed("unbalanced end tag"));
        };
        let text = std::mem::take(&mut self.text);
        if self.finished {
            return Ok(());
        }

        let depth = self.stack.len();
        if depth == 0 {
            self.finished = true;
            self.entry_depth = None;
            return Ok(());
        }

        match self.entry_depth {
            Some(entry_depth) if depth == entry_depth => {
                self.entry_depth = None;
                let entry = std::mem::take(&mut self.entry);
                self.feed.entries.push(entry);
                Ok(())
            }
            Some(entry_depth) => {
                let path = element_path(&self.stack[entry_depth + 1..], &closed);
                assign_entry_field(&mut self.entry, &path, text)
            }
            None => {
                let path = element_path(&self.stack[1..], &closed);
                assign_feed_field(&mut self.feed, &path, text)
            }
        }
    }
}

fn element_path<'a>(open: &'a [Element], closed: &'a Element) -> Vec<(Ns, &'a str)> {
    open.iter()
        .chain(std::iter::once(closed))
        .map(|e| (e.ns, e.name.as_str()))
        .collect()
}

fn assign_feed_field(
    feed: &mut FeedDocument,
    path: &[(Ns, &str)],
    text: String,
) -> Result<(), PicasaError> {
    use Ns::*;
    match path {
        [(Atom, "id")] => feed.id = text,
        [(Atom, "title")] => feed.title = text,
        [(Atom, "author"), (Atom, "name")] => feed.author.name = text,
        [(Atom, "author"), (Atom, "uri")] => feed.author.uri = text,
        [(OpenSearch, "totalResults")] => feed.total_results = parse_count("totalResults", &text)?,
        [(OpenSearch, "startIndex")] => feed.start_index = parse_count("startIndex", &text)?,
        [(OpenSearch, "itemsPerPage")] => {
            feed.items_per_page = parse_count("itemsPerPage", &text)?
        }
        [(GPhoto, "numphotos")] => feed.num_photos = parse_count("numphotos", &text)?,
        [(GPhoto, "user")] => feed.user = text,
        [(GPhoto, "nickname")] => feed.nickname = text,
        [(GPhoto, "thumbnail")] => feed.thumbnail = text,
        _ => (),
    }
    Ok(())
}

fn assign_entry_field(
    entry: &mut RawEntry,
    path: &[(Ns, &str)],
    text: String,
) -> Result<(), PicasaError> {
    use Ns::*;
    match path {
        [(Atom, "id")] => entry.entry_id = text,
        [(GPhoto, "id")] => entry.id = Some(text.trim().to_string()).filter(|v| !v.is_empty()),
        [(GPhoto, "albumid")] => entry.album_id = text,
        [(GPhoto, "name")] => entry.name = text,
        [(Atom, "published")] => entry.published = parse_timestamp("published", &text)?,
        [(Atom, "updated")] => entry.updated = parse_timestamp("updated", &text)?,
        [(Atom, "title")] => entry.title = text,
        [(Atom, "summary")] => entry.summary = text,
        [(Atom, "author"), (Atom, "name")] => entry.author.name = text,
        [(Atom, "author"), (Atom, "uri")] => entry.author.uri = text,
        [(GPhoto, "location")] => entry.location = text,
        [(GPhoto, "numphotos")] => entry.num_photos = parse_count("numphotos", &text)?,
        [(GPhoto, "width")] => entry.width = parse_count("width", &text)?,
        [(GPhoto, "height")] => entry.height = parse_count("height", &text)?,
        [(GPhoto, "size")] => entry.size = parse_count("size", &text)?,
        [(Media, "group"), (Media, "title")] => entry.media.title = text,
        [(Media, "group"), (Media, "description")] => entry.media.description = text,
        [(Media, "group"), (Media, "keywords")] => entry.media.keywords = text,
        [(Exif, "tags"), (Exif, "imageUniqueID")] => entry.exif_uid = text,
        [(GeoRss, "where"), (Gml, "Point"), (Gml, "pos")] => entry.position = text.trim().to_string(),
        _ => (),
    }
    Ok(())
}
