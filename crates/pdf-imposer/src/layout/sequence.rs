//! Page sequence generation
//!
//! A sequence lists, slot by slot, what goes on the output. For booklets
//! and reductions each entry is a source page index (or `None` for a blank
//! slot) and consecutive runs of `pages_in_sheet` entries fill one output
//! page. For linearization each entry is the position at which the
//! matching input tile is inserted into the output document.
//!
//! ## Booklet order (8 pages, 2x1)
//!
//! The padded pages are consumed from both ends:
//! - Sheet 1 front: [8, 1], back: [2, 7]
//! - Sheet 2 front: [6, 3], back: [4, 5]

use std::collections::VecDeque;

use crate::constants::PAGES_PER_BOOKLET_SHEET;
use crate::types::{ConversionType, PageRef};

use super::Layout;

/// Generate the sequence for a conversion of `page_count` source pages
pub fn generate_sequence(
    conversion_type: ConversionType,
    page_count: usize,
    layout: Layout,
    copy_pages: bool,
) -> Vec<PageRef> {
    match conversion_type {
        ConversionType::Bookletize => booklet_sequence(page_count, layout, copy_pages),
        ConversionType::Reduce => reduce_sequence(page_count, layout, copy_pages),
        ConversionType::Linearize => {
            // The group-of-four rule needs at least two tiles per sheet
            let booklet = layout.pages_in_sheet() > 1;
            linearize_sequence(page_count, layout, copy_pages, booklet)
        }
    }
}

/// Number of blank pages needed to fill the last booklet sheet
pub fn booklet_padding(page_count: usize) -> usize {
    (PAGES_PER_BOOKLET_SHEET - page_count % PAGES_PER_BOOKLET_SHEET) % PAGES_PER_BOOKLET_SHEET
}

// =============================================================================
// Bookletize
// =============================================================================

/// Saddle-stitch order: outermost pair first, alternating sides.
///
/// With `copy_pages` each pair is repeated to fill half a sheet, so every
/// output page holds copies of the same two pages.
pub fn booklet_sequence(page_count: usize, layout: Layout, copy_pages: bool) -> Vec<PageRef> {
    let padding = booklet_padding(page_count);
    if padding > 0 {
        log::warn!(
            "{} pages is not a multiple of {}, adding {} blank pages",
            page_count,
            PAGES_PER_BOOKLET_SHEET,
            padding
        );
    }

    let mut pages: VecDeque<PageRef> = (0..page_count)
        .map(Some)
        .chain(std::iter::repeat(None).take(padding))
        .collect();

    let copies = if copy_pages {
        (layout.pages_in_sheet() / 2).max(1)
    } else {
        1
    };

    let mut sequence = Vec::with_capacity((page_count + padding) * copies);
    let mut push_pair = |first: Option<PageRef>, second: Option<PageRef>| {
        // The deque length is always a multiple of four, so pops never fail
        let pair = [first.flatten(), second.flatten()];
        for _ in 0..copies {
            sequence.extend_from_slice(&pair);
        }
    };

    while !pages.is_empty() {
        let last = pages.pop_back();
        let first = pages.pop_front();
        push_pair(last, first);

        let first = pages.pop_front();
        let last = pages.pop_back();
        push_pair(first, last);
    }

    sequence
}

// =============================================================================
// Reduce
// =============================================================================

/// Source pages in order, either padded to whole sheets or each repeated
/// to fill its own sheet.
pub fn reduce_sequence(page_count: usize, layout: Layout, copy_pages: bool) -> Vec<PageRef> {
    let per_sheet = layout.pages_in_sheet();

    if copy_pages {
        return (0..page_count)
            .flat_map(|page| std::iter::repeat(Some(page)).take(per_sheet))
            .collect();
    }

    let padded = page_count.div_ceil(per_sheet) * per_sheet;
    (0..page_count)
        .map(Some)
        .chain(std::iter::repeat(None))
        .take(padded)
        .collect()
}

// =============================================================================
// Linearize
// =============================================================================

/// Insertion positions that turn booklet tiles back into reading order.
///
/// `page_count` is the number of booklet sheet sides in the input; the
/// index space holds one entry per tile (`page_count × pages_in_sheet`).
/// With `copy_pages` only the first two tiles of each sheet carry content
/// and the remaining ones are skipped. A trailing group that does not fit
/// the index space is dropped.
///
/// When `booklet` is false the input is already linear and tiles are
/// appended in order.
pub fn linearize_sequence(
    page_count: usize,
    layout: Layout,
    copy_pages: bool,
    booklet: bool,
) -> Vec<PageRef> {
    let tiles = page_count * layout.pages_in_sheet();

    if !booklet {
        return (0..tiles).map(Some).collect();
    }

    let skipped = if copy_pages {
        layout.pages_in_sheet().saturating_sub(2)
    } else {
        0
    };

    let mut sequence = Vec::with_capacity(tiles + PAGES_PER_BOOKLET_SHEET);
    let mut push_pair = |pair: [usize; 2]| {
        sequence.extend(pair.iter().copied().map(Some));
        sequence.extend(std::iter::repeat(None).take(skipped));
    };

    for i in (0..tiles).step_by(PAGES_PER_BOOKLET_SHEET) {
        let half = i / 2;
        push_pair([half, half]);
        push_pair([half + 1, half + 2]);
    }

    if sequence.len() > tiles {
        log::debug!(
            "Dropping {} trailing tile positions",
            sequence.len() - tiles
        );
        sequence.truncate(tiles);
    }
    sequence
}
