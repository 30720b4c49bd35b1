//! Shared constants for page conversion
//!
//! This module centralizes defaults and magic numbers used throughout
//! the conversion process.

// =============================================================================
// Default Page Dimensions
// =============================================================================

/// Default page width in points (US Letter: 8.5" × 11")
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 612.0;

/// Default page height in points (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 792.0;

/// Default page dimensions as tuple (width, height), used when a page has no MediaBox
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT);

// =============================================================================
// Paper Formats
// =============================================================================

/// Known output formats in points, portrait.
///
/// Several names appear twice; lookups take the last entry.
pub const PAPER_FORMATS: &[(&str, (f32, f32))] = &[
    ("A3", (841.0, 1190.0)),
    ("A3", (842.0, 1192.0)),
    ("A4", (595.0, 841.0)),
    ("A4", (595.0, 842.0)),
    ("A5", (420.0, 595.0)),
    ("Letter", (612.0, 792.0)),
    ("Legal", (612.0, 1008.0)),
    ("Tabloid", (792.0, 1224.0)),
];

/// Suffix on a format name requesting its rotated (landscape) variant
pub const ROTATED_FORMAT_SUFFIX: char = 'R';

// =============================================================================
// Defaults
// =============================================================================

pub const DEFAULT_LAYOUT: &str = "2x1";

pub const DEFAULT_PAPER_FORMAT: &str = "A4";

/// Appended to the input file stem when no output path is given
pub const OUTPUT_FILE_SUFFIX: &str = "-conv.pdf";

// =============================================================================
// Booklets
// =============================================================================

/// Pages carried by one folded booklet sheet (two sides, two pages each)
pub const PAGES_PER_BOOKLET_SHEET: usize = 4;

/// Largest number of tiles accepted on one output page
pub const MAX_PAGES_PER_SHEET: usize = 256;
