//! Core record types.
//!
//! The remote API serves three kinds of records — tags, pages, and content
//! bodies — identified by server-assigned string ids and linked to each
//! other by foreign-key ids. Each record pairs its raw fields with the
//! derived attributes the views consume: rendered markdown previews, a
//! formatted date, and a tag's weight. Derived attributes recompute exactly
//! when their source field is written (see [`crate::reactive`]).

use crate::reactive::{Derived, Source};
use crate::render;
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use std::fmt;

/// A server-assigned record identifier.
pub type RecordId = String;

/// The three record kinds the content API serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordKind {
    Tag,
    Page,
    Content,
}

impl RecordKind {
    /// The URL path segment for this kind, e.g. `/api/tags`.
    pub fn endpoint(&self) -> &'static str {
        match self {
            RecordKind::Tag => "tags",
            RecordKind::Page => "pages",
            RecordKind::Content => "contents",
        }
    }

    /// The envelope key for a single record, e.g. `{"tag": {...}}`.
    pub fn singular(&self) -> &'static str {
        match self {
            RecordKind::Tag => "tag",
            RecordKind::Page => "page",
            RecordKind::Content => "content",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

/// Display format for dated pages.
const DATE_FORMAT: &str = "%b %d %Y";
/// Long format used by the undated fallback.
const TODAY_FORMAT: &str = "%B %-d, %Y";

/// Wire shape of a tag record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagData {
    pub id: RecordId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub pages: Vec<RecordId>,
    #[serde(default)]
    pub parent: Option<RecordId>,
    #[serde(default)]
    pub children: Vec<RecordId>,
    #[serde(default)]
    pub content: Option<RecordId>,
}

/// A tag: a titled grouping of pages, itself part of a tag hierarchy.
#[derive(Debug, Clone)]
pub struct Tag {
    id: RecordId,
    title: Source<String>,
    summary: Source<Option<String>>,
    pages: Source<Vec<RecordId>>,
    parent: Source<Option<RecordId>>,
    children: Source<Vec<RecordId>>,
    content: Source<Option<RecordId>>,
    preview: Derived<Option<String>>,
    weight: Derived<usize>,
}

impl Tag {
    pub fn from_data(data: TagData) -> Self {
        Self {
            id: data.id,
            title: Source::new(data.title),
            summary: Source::new(data.summary),
            pages: Source::new(data.pages),
            parent: Source::new(data.parent),
            children: Source::new(data.children),
            content: Source::new(data.content),
            preview: Derived::new(),
            weight: Derived::new(),
        }
    }

    /// Fold a re-fetched copy of this record into the cached instance.
    /// Only fields that actually changed are written, so derived values
    /// invalidate only when something moved.
    pub fn merge(&mut self, data: TagData) {
        self.title.set_if_changed(data.title);
        self.summary.set_if_changed(data.summary);
        self.pages.set_if_changed(data.pages);
        self.parent.set_if_changed(data.parent);
        self.children.set_if_changed(data.children);
        self.content.set_if_changed(data.content);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        self.title.get()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.get().as_deref()
    }

    pub fn page_ids(&self) -> &[RecordId] {
        self.pages.get()
    }

    pub fn parent_id(&self) -> Option<&str> {
        self.parent.get().as_deref()
    }

    pub fn child_ids(&self) -> &[RecordId] {
        self.children.get()
    }

    pub fn content_id(&self) -> Option<&str> {
        self.content.get().as_deref()
    }

    pub fn set_summary(&mut self, summary: Option<String>) {
        self.summary.set(summary);
    }

    pub fn set_page_ids(&mut self, pages: Vec<RecordId>) {
        self.pages.set(pages);
    }

    /// Rendered HTML of the summary, if there is one.
    pub fn preview(&self) -> Option<String> {
        self.preview
            .get(&self.summary, |s| render::markdown(s.as_deref()))
    }

    /// The number of pages carrying this tag. Listings sort by it.
    pub fn weight(&self) -> usize {
        self.weight.get(&self.pages, |pages| pages.len())
    }
}

/// Wire shape of a page record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageData {
    pub id: RecordId,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Vec<RecordId>,
    #[serde(default)]
    pub content: Option<RecordId>,
}

/// A page: a dated, tagged entry whose full body lives in a content record.
#[derive(Debug, Clone)]
pub struct Page {
    id: RecordId,
    date: Source<Option<String>>,
    title: Source<String>,
    summary: Source<Option<String>>,
    tags: Source<Vec<RecordId>>,
    content: Source<Option<RecordId>>,
    when: Derived<String>,
    preview: Derived<Option<String>>,
}

impl Page {
    pub fn from_data(data: PageData) -> Self {
        Self {
            id: data.id,
            date: Source::new(data.date),
            title: Source::new(data.title),
            summary: Source::new(data.summary),
            tags: Source::new(data.tags),
            content: Source::new(data.content),
            when: Derived::new(),
            preview: Derived::new(),
        }
    }

    pub fn merge(&mut self, data: PageData) {
        self.date.set_if_changed(data.date);
        self.title.set_if_changed(data.title);
        self.summary.set_if_changed(data.summary);
        self.tags.set_if_changed(data.tags);
        self.content.set_if_changed(data.content);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        self.title.get()
    }

    pub fn date(&self) -> Option<&str> {
        self.date.get().as_deref()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.get().as_deref()
    }

    pub fn tag_ids(&self) -> &[RecordId] {
        self.tags.get()
    }

    pub fn content_id(&self) -> Option<&str> {
        self.content.get().as_deref()
    }

    pub fn set_date(&mut self, date: Option<String>) {
        self.date.set(date);
    }

    pub fn set_summary(&mut self, summary: Option<String>) {
        self.summary.set(summary);
    }

    /// Human-readable date for listings.
    ///
    /// A page without a parseable date shows *today's* date, in the long
    /// format. Kept as-is deliberately; undated pages would all list as
    /// "today".
    pub fn when(&self) -> String {
        self.when.get(&self.date, |date| {
            date.as_deref()
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_else(|| Local::now().format(TODAY_FORMAT).to_string())
        })
    }

    /// Rendered HTML of the summary, if there is one.
    pub fn preview(&self) -> Option<String> {
        self.preview
            .get(&self.summary, |s| render::markdown(s.as_deref()))
    }
}

/// Wire shape of a content record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentData {
    pub id: RecordId,
    #[serde(default)]
    pub matter: Option<String>,
}

/// A content record: the full markdown body behind a page or tag.
#[derive(Debug, Clone)]
pub struct Content {
    id: RecordId,
    matter: Source<Option<String>>,
    rendered: Derived<Option<String>>,
}

impl Content {
    pub fn from_data(data: ContentData) -> Self {
        Self {
            id: data.id,
            matter: Source::new(data.matter),
            rendered: Derived::new(),
        }
    }

    pub fn merge(&mut self, data: ContentData) {
        self.matter.set_if_changed(data.matter);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn matter(&self) -> Option<&str> {
        self.matter.get().as_deref()
    }

    pub fn set_matter(&mut self, matter: Option<String>) {
        self.matter.set(matter);
    }

    /// Rendered HTML of the full body.
    pub fn rendered(&self) -> Option<String> {
        self.rendered
            .get(&self.matter, |m| render::markdown(m.as_deref()))
    }
}
