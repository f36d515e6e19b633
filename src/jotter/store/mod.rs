//! # Data Access
//!
//! The remote content API is reached through the [`Transport`] trait, so the
//! rest of the crate never touches HTTP directly:
//!
//! - [`http::HttpTransport`]: the production client, `GET`ting
//!   `<base>/api/{tags,pages,contents}` and unwrapping the JSON envelopes.
//! - [`memory::MemTransport`]: fixture-backed transport for tests, with a
//!   poisoned mode that fails every fetch.
//!
//! On top of a transport sits the [`Store`]: an identity-mapped cache keyed
//! by record kind + id. Collections are fetched once and kept for the life
//! of the process; by-id lookups consult the cache before the network;
//! relationship accessors resolve foreign keys through the same cache,
//! fetching on miss. A record seen twice is merged into its cached instance
//! in place, so derived attributes invalidate instead of the record being
//! replaced behind a reader's back.
//!
//! The client is read-only. There is no write path, no eviction, and no
//! retry: a failed fetch is an error the router turns into the error view.

use crate::error::{JotterError, Result};
use crate::model::{Content, ContentData, Page, PageData, RecordId, RecordKind, Tag, TagData};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tracing::debug;

pub mod http;
pub mod memory;

/// Abstract interface to the content API.
///
/// Implementations return raw envelope-free JSON records and must map
/// network failure and non-2xx responses to [`JotterError::Fetch`].
pub trait Transport {
    /// Fetch every record of a kind.
    fn fetch_all(&self, kind: RecordKind) -> Result<Vec<Value>>;

    /// Fetch a single record by id.
    fn fetch_one(&self, kind: RecordKind, id: &str) -> Result<Value>;
}

/// Identity-mapped record cache over a [`Transport`].
pub struct Store<T: Transport> {
    transport: T,
    tags: HashMap<RecordId, Tag>,
    pages: HashMap<RecordId, Page>,
    contents: HashMap<RecordId, Content>,
    fetched: HashSet<RecordKind>,
}

impl<T: Transport> Store<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            tags: HashMap::new(),
            pages: HashMap::new(),
            contents: HashMap::new(),
            fetched: HashSet::new(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// All tags, fetching the collection on first use.
    pub fn tags(&mut self) -> Result<Vec<&Tag>> {
        self.ensure_collection(RecordKind::Tag)?;
        Ok(self.tags.values().collect())
    }

    /// All pages, fetching the collection on first use.
    pub fn pages(&mut self) -> Result<Vec<&Page>> {
        self.ensure_collection(RecordKind::Page)?;
        Ok(self.pages.values().collect())
    }

    /// A tag by id, fetching on cache miss.
    pub fn tag(&mut self, id: &str) -> Result<&Tag> {
        self.ensure_record(RecordKind::Tag, id)?;
        self.tags.get(id).ok_or_else(|| JotterError::NotFound {
            kind: RecordKind::Tag,
            id: id.to_string(),
        })
    }

    /// A page by id, fetching on cache miss.
    pub fn page(&mut self, id: &str) -> Result<&Page> {
        self.ensure_record(RecordKind::Page, id)?;
        self.pages.get(id).ok_or_else(|| JotterError::NotFound {
            kind: RecordKind::Page,
            id: id.to_string(),
        })
    }

    /// A content body by id, fetching on cache miss.
    pub fn content(&mut self, id: &str) -> Result<&Content> {
        self.ensure_record(RecordKind::Content, id)?;
        self.contents.get(id).ok_or_else(|| JotterError::NotFound {
            kind: RecordKind::Content,
            id: id.to_string(),
        })
    }

    /// The pages of a tag, resolved lazily through the cache.
    pub fn pages_of(&mut self, tag_id: &str) -> Result<Vec<&Page>> {
        let ids: Vec<RecordId> = self.tag(tag_id)?.page_ids().to_vec();
        for id in &ids {
            self.ensure_record(RecordKind::Page, id)?;
        }
        ids.iter()
            .map(|id| {
                self.pages.get(id).ok_or_else(|| JotterError::NotFound {
                    kind: RecordKind::Page,
                    id: id.clone(),
                })
            })
            .collect()
    }

    /// The tags of a page, resolved lazily through the cache.
    pub fn tags_of(&mut self, page_id: &str) -> Result<Vec<&Tag>> {
        let ids: Vec<RecordId> = self.page(page_id)?.tag_ids().to_vec();
        for id in &ids {
            self.ensure_record(RecordKind::Tag, id)?;
        }
        ids.iter()
            .map(|id| {
                self.tags.get(id).ok_or_else(|| JotterError::NotFound {
                    kind: RecordKind::Tag,
                    id: id.clone(),
                })
            })
            .collect()
    }

    fn ensure_collection(&mut self, kind: RecordKind) -> Result<()> {
        if self.fetched.contains(&kind) {
            return Ok(());
        }
        debug!(%kind, "fetching collection");
        let values = self.transport.fetch_all(kind)?;
        for value in values {
            self.absorb(kind, value)?;
        }
        self.fetched.insert(kind);
        Ok(())
    }

    fn ensure_record(&mut self, kind: RecordKind, id: &str) -> Result<()> {
        let cached = match kind {
            RecordKind::Tag => self.tags.contains_key(id),
            RecordKind::Page => self.pages.contains_key(id),
            RecordKind::Content => self.contents.contains_key(id),
        };
        if cached {
            return Ok(());
        }
        debug!(%kind, id, "fetching record");
        let value = self.transport.fetch_one(kind, id)?;
        self.absorb(kind, value)
    }

    /// Insert a fetched record, or merge it into the cached instance.
    fn absorb(&mut self, kind: RecordKind, value: Value) -> Result<()> {
        match kind {
            RecordKind::Tag => {
                let data: TagData = serde_json::from_value(value)?;
                match self.tags.get_mut(&data.id) {
                    Some(tag) => tag.merge(data),
                    None => {
                        self.tags.insert(data.id.clone(), Tag::from_data(data));
                    }
                }
            }
            RecordKind::Page => {
                let data: PageData = serde_json::from_value(value)?;
                match self.pages.get_mut(&data.id) {
                    Some(page) => page.merge(data),
                    None => {
                        self.pages.insert(data.id.clone(), Page::from_data(data));
                    }
                }
            }
            RecordKind::Content => {
                let data: ContentData = serde_json::from_value(value)?;
                match self.contents.get_mut(&data.id) {
                    Some(content) => content.merge(data),
                    None => {
                        self.contents
                            .insert(data.id.clone(), Content::from_data(data));
                    }
                }
            }
        }
        Ok(())
    }
}
