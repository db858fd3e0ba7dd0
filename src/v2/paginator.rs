/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Walks a start-index paginated feed until the server reported total is reached.

use crate::v2::config::START_INDEX_PLACEHOLDER;
use crate::v2::errors::{MappingError, PicasaError};
use crate::v2::feed::{FeedDocument, RawEntry};
use crate::v2::{Client, EntityKind, GeoPolicy};
use async_stream::try_stream;
use futures::Stream;
use log::debug;
use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// An entity a feed entry maps into
pub trait FeedEntity: Sized {
    const KIND: EntityKind;

    /// Maps one entry
    fn from_entry(entry: &RawEntry, policy: GeoPolicy) -> Result<Self, MappingError>;

    /// The size of the whole collection as reported by a page
    fn reported_total(feed: &FeedDocument) -> Option<u64>;
}

/// Position of a traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationCursor {
    /// 1-based index of the next page's first entry
    pub start_index: u64,
    pub accumulated: usize,
    pub has_more: bool,
}

impl Default for PaginationCursor {
    fn default() -> Self {
        Self {
            start_index: 1,
            accumulated: 0,
            has_more: true,
        }
    }
}

impl PaginationCursor {
    // The next start index is always derived from what actually arrived, never from itemsPerPage
    fn advance(&mut self, page_len: usize, reported_total: Option<u64>) {
        if page_len == 0 {
            self.has_more = false;
            return;
        }
        self.accumulated += page_len;
        self.start_index = 1 + self.accumulated as u64;
        self.has_more = reported_total.is_some_and(|total| (self.accumulated as u64) < total);
    }
}

/// Shared flag to stop a traversal between pages
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Sequential page-by-page traversal of one listing.
///
/// The cursor only moves once a page has been fetched, decoded and mapped completely, so after
/// an error [`Paginator::next_page`] can be called again to retry the same page.
#[derive(Debug)]
pub struct Paginator<T> {
    client: Client,
    template: String,
    query: Vec<(String, String)>,
    cursor: PaginationCursor,
    kind: PhantomData<fn() -> T>,
}

impl<T: FeedEntity> Paginator<T> {
    pub(crate) fn new(client: Client, template: String, query: Vec<(String, String)>) -> Self {
        Self {
            client,
            template,
            query,
            cursor: PaginationCursor::default(),
            kind: PhantomData,
        }
    }

    pub fn cursor(&self) -> PaginationCursor {
        self.cursor
    }

    pub fn is_done(&self) -> bool {
        !self.cursor.has_more
    }

    /// URL of the next page
    pub fn page_url(&self) -> Result<String, PicasaError> {
        let expanded = self
            .template
            .replace(START_INDEX_PLACEHOLDER, &self.cursor.start_index.to_string());
        if self.query.is_empty() {
            return Ok(expanded);
        }
        let mut url = url::Url::parse(&expanded)?;
        url.query_pairs_mut()
            .extend_pairs(self.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        Ok(url.into())
    }

    /// Fetches the next page. Returns `None` once the listing is exhausted.
    pub async fn next_page(&mut self) -> Result<Option<Vec<T>>, PicasaError> {
        if !self.cursor.has_more {
            return Ok(None);
        }
        let url = self.page_url()?;
        let feed = self.client.fetch_feed(&url).await?;
        let reported_total = T::reported_total(&feed);
        debug!(
            "{} page at {}: {} entries, reported total {:?}",
            T::KIND,
            self.cursor.start_index,
            feed.entries.len(),
            reported_total
        );

        let policy = self.client.config().geo_policy;
        let page = feed
            .entries
            .iter()
            .map(|entry| T::from_entry(entry, policy))
            .collect::<Result<Vec<_>, _>>()?;

        self.cursor.advance(page.len(), reported_total);
        if page.is_empty() {
            return Ok(None);
        }
        Ok(Some(page))
    }

    /// Walks every remaining page and returns the complete listing.
    /// Any error discards what was accumulated so far.
    pub async fn collect_all(mut self, cancel: Option<&CancelFlag>) -> Result<Vec<T>, PicasaError> {
        let mut all = Vec::new();
        loop {
            if cancel.is_some_and(CancelFlag::is_cancelled) {
                return Err(PicasaError::Cancelled {
                    accumulated: self.cursor.accumulated,
                });
            }
            match self.next_page().await? {
                Some(page) => all.extend(page),
                None => return Ok(all),
            }
        }
    }

    /// Returns the remaining pages as a stream. Dropping the stream stops the traversal.
    pub fn into_stream(mut self) -> impl Stream<Item = Result<Vec<T>, PicasaError>> {
        try_stream! {
            while let Some(page) = self.next_page().await? {
                yield page;
            }
        }
    }
}
