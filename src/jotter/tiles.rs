//! The page tile board.
//!
//! The home view presents recent pages as uniform tiles. Geometry is
//! derived from the viewport height once, when the board is built — a
//! resize does not reflow an existing board. Each tile contains exactly one
//! anchor; activating the tile anywhere navigates to that anchor's target,
//! so the whole tile is clickable, not just the link text.

/// Tile geometry for a given viewport height: each tile is a quarter of it,
/// with a gap of a twenty-fifth below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileLayout {
    pub height: usize,
    pub margin_bottom: usize,
}

impl TileLayout {
    pub fn compute(viewport_height: usize) -> Self {
        Self {
            height: viewport_height / 4,
            margin_bottom: viewport_height / 25,
        }
    }
}

/// One tile: a label and the anchor it navigates to.
#[derive(Debug, Clone)]
pub struct Tile {
    pub label: String,
    pub href: String,
    hovered: bool,
}

impl Tile {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            hovered: false,
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }
}

/// A set of tiles sharing one layout.
#[derive(Debug, Clone)]
pub struct TileBoard {
    layout: TileLayout,
    tiles: Vec<Tile>,
}

impl TileBoard {
    /// Build a board, computing the layout from the viewport height once.
    pub fn new(viewport_height: usize, tiles: Vec<Tile>) -> Self {
        Self {
            layout: TileLayout::compute(viewport_height),
            tiles,
        }
    }

    pub fn layout(&self) -> TileLayout {
        self.layout
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn hover_enter(&mut self, index: usize) {
        if let Some(tile) = self.tiles.get_mut(index) {
            tile.hovered = true;
        }
    }

    pub fn hover_leave(&mut self, index: usize) {
        if let Some(tile) = self.tiles.get_mut(index) {
            tile.hovered = false;
        }
    }

    /// Activate a tile: the navigation target is the contained anchor's
    /// href. Returns `None` for an index outside the board.
    pub fn click(&self, index: usize) -> Option<&str> {
        self.tiles.get(index).map(|t| t.href.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_quarters_the_viewport() {
        let layout = TileLayout::compute(100);
        assert_eq!(layout.height, 25);
        assert_eq!(layout.margin_bottom, 4);
    }

    #[test]
    fn test_layout_small_viewport() {
        let layout = TileLayout::compute(24);
        assert_eq!(layout.height, 6);
        assert_eq!(layout.margin_bottom, 0);
    }

    #[test]
    fn test_layout_fixed_at_build_time() {
        let board = TileBoard::new(100, vec![Tile::new("A", "/a")]);
        // The board keeps the geometry it was built with.
        assert_eq!(board.layout(), TileLayout::compute(100));
    }

    #[test]
    fn test_hover_toggles() {
        let mut board = TileBoard::new(100, vec![Tile::new("A", "/a"), Tile::new("B", "/b")]);
        board.hover_enter(1);
        assert!(!board.tiles()[0].is_hovered());
        assert!(board.tiles()[1].is_hovered());
        board.hover_leave(1);
        assert!(!board.tiles()[1].is_hovered());
    }

    #[test]
    fn test_hover_out_of_range_is_ignored() {
        let mut board = TileBoard::new(100, vec![Tile::new("A", "/a")]);
        board.hover_enter(9);
        assert!(!board.tiles()[0].is_hovered());
    }

    #[test]
    fn test_click_resolves_the_anchor() {
        let board = TileBoard::new(100, vec![Tile::new("A", "/a"), Tile::new("B", "/b")]);
        assert_eq!(board.click(0), Some("/a"));
        assert_eq!(board.click(1), Some("/b"));
        assert_eq!(board.click(2), None);
    }
}
