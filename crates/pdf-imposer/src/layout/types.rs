//! Layout data types for page conversion
//!
//! These types represent the intermediate calculations between
//! configuration parsing and PDF rendering.

use crate::constants::MAX_PAGES_PER_SHEET;

/// How many source pages are tiled across and down one output page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layout {
    /// Number of pages across the width (always ≥ 1)
    pub pages_in_width: usize,
    /// Number of pages down the height (always ≥ 1)
    pub pages_in_height: usize,
}

impl Layout {
    /// Create a layout, rejecting zero dimensions and sheets holding more
    /// than [`MAX_PAGES_PER_SHEET`] tiles
    pub fn new(pages_in_width: usize, pages_in_height: usize) -> Option<Self> {
        let tiles = pages_in_width.checked_mul(pages_in_height)?;
        (tiles > 0 && tiles <= MAX_PAGES_PER_SHEET).then_some(Self {
            pages_in_width,
            pages_in_height,
        })
    }

    /// Number of tiles on one output page
    pub fn pages_in_sheet(&self) -> usize {
        self.pages_in_width * self.pages_in_height
    }

    /// All tile positions of one sheet, in the order they are filled
    pub fn slots(&self) -> impl Iterator<Item = GridPosition> + '_ {
        (0..self.pages_in_height).flat_map(move |row| {
            (0..self.pages_in_width).map(move |col| GridPosition::new(row, col))
        })
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.pages_in_width, self.pages_in_height)
    }
}

/// A named output paper format, dimensions in points
#[derive(Debug, Clone, PartialEq)]
pub struct PaperFormat {
    /// Name as requested, including any rotation suffix
    pub name: String,
    pub width_pt: f32,
    pub height_pt: f32,
}

impl PaperFormat {
    pub fn size(&self) -> (f32, f32) {
        (self.width_pt, self.height_pt)
    }
}

/// Position of a tile within a sheet (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Scale and translation applied to a source page when it is merged
/// onto an output page. Origin is bottom-left, units are points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub scale: f32,
    pub dx: f32,
    pub dy: f32,
}
