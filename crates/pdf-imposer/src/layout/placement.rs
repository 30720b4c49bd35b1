//! Tile placement geometry
//!
//! Computes the affine transform (uniform scale plus translation) used to
//! merge a source page onto an output page:
//! - Tiling: a whole source page shrinks into one cell of the sheet
//! - Extraction: a sheet is enlarged so one cell covers a whole page

use super::{GridPosition, Layout, Placement};

/// Place a full source page into tile `pos` of an output sheet.
///
/// The scale is width-driven: the page is fitted to the column width.
/// Row 0 is the top of the sheet, while PDF's origin is bottom-left.
///
/// # Arguments
/// * `layout` - Tiles across and down the sheet
/// * `input_size` - Source page (width, height) in points
/// * `output_size` - Output sheet (width, height) in points
/// * `pos` - Target tile
pub fn tile_placement(
    layout: Layout,
    input_size: (f32, f32),
    output_size: (f32, f32),
    pos: GridPosition,
) -> Placement {
    let (input_width, _) = input_size;
    let (output_width, output_height) = output_size;
    let cols = layout.pages_in_width as f32;
    let rows = layout.pages_in_height as f32;

    Placement {
        scale: output_width / (cols * input_width),
        dx: pos.col as f32 * output_width / cols,
        dy: output_height - (pos.row as f32 + 1.0) * output_height / rows,
    }
}

/// Place a source sheet so that its tile `pos` covers a whole output page.
///
/// This is the inverse of [`tile_placement`]: the sheet is enlarged and
/// shifted so the wanted tile lands on the page and the rest falls outside
/// the page box.
pub fn extract_placement(
    layout: Layout,
    input_size: (f32, f32),
    output_size: (f32, f32),
    pos: GridPosition,
) -> Placement {
    let (input_width, _) = input_size;
    let (output_width, output_height) = output_size;
    let cols = layout.pages_in_width as f32;
    let rows = layout.pages_in_height as f32;

    Placement {
        scale: cols * output_width / input_width,
        dx: -(pos.col as f32) * output_width,
        dy: (pos.row as f32 - rows + 1.0) * output_height,
    }
}
