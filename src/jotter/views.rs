//! The four views: home, tag, page, error.
//!
//! Each view renders controller state to a styled string; the binary is the
//! only thing that prints. Derived values that are absent (no summary, no
//! content body) simply omit their section.

use crate::controllers::{self, AppController};
use crate::error::Result;
use crate::router::State;
use crate::store::{Store, Transport};
use crate::tiles::{Tile, TileBoard};
use colored::Colorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;

/// The terminal the views are rendered for. Captured once per render; a
/// resize affects only the next render, matching the tile board's
/// compute-once geometry.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
        }
    }
}

/// Render the view for the router's current state.
pub fn render<T: Transport>(
    state: &State,
    store: &mut Store<T>,
    app: &AppController,
    viewport: Viewport,
) -> Result<String> {
    match state {
        State::Home => home(store, app, viewport),
        State::Tag(id) => tag(id, store),
        State::Page(id) => page(id, store),
        State::Error => Ok(error()),
    }
}

/// Home: the site header, a tile per recent page, the tag listing, and the
/// copyright footer.
fn home<T: Transport>(
    store: &mut Store<T>,
    app: &AppController,
    viewport: Viewport,
) -> Result<String> {
    let width = viewport.width.min(LINE_WIDTH);
    let mut out = String::new();

    out.push_str(&format!("{}\n", app.site_name().bold()));

    let tiles: Vec<Tile> = controllers::page_listing(store)?
        .iter()
        .map(|p| {
            Tile::new(
                format!("{}  {}", p.title(), p.when().dimmed()),
                format!("/{}", p.id()),
            )
        })
        .collect();
    let board = TileBoard::new(viewport.height, tiles);
    out.push_str(&render_board(&board, width));

    out.push_str(&format!("\n{}\n", "Tags".bold()));
    for tag in controllers::tag_listing(store)? {
        out.push_str(&format!(
            "  {}  {}\n",
            tag.title(),
            format!("({})", tag.weight()).dimmed()
        ));
    }

    out.push_str(&format!(
        "\n{}\n",
        format!("© {} {}", controllers::this_year(), app.site_name()).dimmed()
    ));
    Ok(out)
}

/// One tile per page, sized by the board's layout: a separator, the label,
/// blank fill to the tile height, then the bottom margin.
fn render_board(board: &TileBoard, width: usize) -> String {
    let layout = board.layout();
    let mut out = String::new();
    for tile in board.tiles() {
        out.push_str(&"-".repeat(width));
        out.push('\n');
        out.push_str(&truncate_to_width(&tile.label, width));
        out.push('\n');
        for _ in 2..layout.height {
            out.push('\n');
        }
        for _ in 0..layout.margin_bottom {
            out.push('\n');
        }
    }
    out
}

/// Tag: title, rendered summary, and the tag's pages with their dates.
fn tag<T: Transport>(id: &str, store: &mut Store<T>) -> Result<String> {
    let (title, preview) = {
        let tag = store.tag(id)?;
        (tag.title().to_string(), tag.preview())
    };

    let mut out = String::new();
    out.push_str(&format!("{}\n", title.bold()));
    out.push_str(&"-".repeat(title.width().min(LINE_WIDTH)));
    out.push('\n');
    if let Some(preview) = preview {
        out.push_str(&preview);
        out.push('\n');
    }

    for page in store.pages_of(id)? {
        out.push_str(&format!(
            "  {}  {}\n",
            page.title(),
            page.when().dimmed()
        ));
    }
    Ok(out)
}

/// Page: title, date, tags, and the full rendered body.
fn page<T: Transport>(id: &str, store: &mut Store<T>) -> Result<String> {
    let (title, when, content_id) = {
        let page = store.page(id)?;
        (
            page.title().to_string(),
            page.when(),
            page.content_id().map(String::from),
        )
    };
    let tag_titles: Vec<String> = store
        .tags_of(id)?
        .iter()
        .map(|t| t.title().to_string())
        .collect();

    let mut out = String::new();
    out.push_str(&format!("{}  {}\n", title.bold(), when.dimmed()));
    if !tag_titles.is_empty() {
        out.push_str(&format!("{}\n", format!("tagged: {}", tag_titles.join(", ")).dimmed()));
    }
    out.push_str(&"-".repeat(title.width().min(LINE_WIDTH)));
    out.push('\n');
    if let Some(content_id) = content_id {
        if let Some(rendered) = store.content(&content_id)?.rendered() {
            out.push_str(&rendered);
            out.push('\n');
        }
    }
    Ok(out)
}

/// Error: the static apology. Nothing is fetched.
fn error() -> String {
    format!(
        "{}\n{}\n",
        "Sorry, that didn't load.".red(),
        "The notebook may be unreachable. Any other link will still work.".dimmed()
    )
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
