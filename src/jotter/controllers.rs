//! Controllers: sorted projections over the store plus the navigation
//! context the views and the title bar follow.

use crate::error::Result;
use crate::model::{Page, RecordId, Tag};
use crate::store::{Store, Transport};
use chrono::{Datelike, Local};

/// All tags, sorted ascending by weight. Ties keep a stable order by title.
pub fn tag_listing<T: Transport>(store: &mut Store<T>) -> Result<Vec<&Tag>> {
    let mut tags = store.tags()?;
    tags.sort_by(|a, b| {
        a.weight()
            .cmp(&b.weight())
            .then_with(|| a.title().cmp(b.title()))
    });
    Ok(tags)
}

/// All pages, sorted descending by date (newest first). Undated pages sink
/// to the end.
pub fn page_listing<T: Transport>(store: &mut Store<T>) -> Result<Vec<&Page>> {
    let mut pages = store.pages()?;
    pages.sort_by(|a, b| b.date().cmp(&a.date()));
    Ok(pages)
}

/// The current calendar year, for the footer line.
pub fn this_year() -> i32 {
    Local::now().year()
}

/// Where the application currently is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Current {
    #[default]
    None,
    /// The synthetic home context; always loaded, nothing fetched.
    Home { title: String },
    Page { id: RecordId, title: String },
    Tag { id: RecordId, title: String },
}

impl Current {
    pub fn title(&self) -> Option<&str> {
        match self {
            Current::None => None,
            Current::Home { title } => Some(title),
            Current::Page { title, .. } => Some(title),
            Current::Tag { title, .. } => Some(title),
        }
    }
}

/// Receives the synchronized display title.
pub trait TitleSink {
    fn set_title(&mut self, title: &str);
}

/// Sets the terminal window title.
pub struct TermTitle;

impl TitleSink for TermTitle {
    fn set_title(&mut self, title: &str) {
        console::Term::stdout().set_title(title);
    }
}

/// Discards titles; used with `--no-title` and piped output.
pub struct NullTitle;

impl TitleSink for NullTitle {
    fn set_title(&mut self, _title: &str) {}
}

/// The application controller: holds the navigation context and keeps the
/// display title in sync with it.
pub struct AppController {
    site_name: String,
    current: Current,
    sink: Box<dyn TitleSink>,
}

impl AppController {
    pub fn new(site_name: impl Into<String>, sink: Box<dyn TitleSink>) -> Self {
        Self {
            site_name: site_name.into(),
            current: Current::None,
            sink,
        }
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    pub fn current(&self) -> &Current {
        &self.current
    }

    /// Swap the navigation context. When the new context carries a title,
    /// the sink receives `"<site> | <title>"`; when it doesn't, no update
    /// fires and the previous title stands.
    pub fn set_current(&mut self, current: Current) {
        if let Some(title) = current.title() {
            let full = format!("{} | {}", self.site_name, title);
            self.sink.set_title(&full);
        }
        self.current = current;
    }
}
