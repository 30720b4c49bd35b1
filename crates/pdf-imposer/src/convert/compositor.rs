//! Drives a [`DocumentBackend`] through a generated page sequence

use crate::layout::{extract_placement, tile_placement};
use crate::render::DocumentBackend;
use crate::types::*;

use super::{CancelToken, ConversionContext};

/// Fill output sheets from `sequence` (bookletize and reduce).
///
/// Each run of `pages_in_sheet` entries becomes one output page of the
/// resolved output size. Returns the number of pages created.
pub(crate) fn compose_sheets<B, P>(
    backend: &mut B,
    context: &ConversionContext,
    sequence: &[PageRef],
    progress: &mut P,
    cancel: &CancelToken,
) -> Result<usize>
where
    B: DocumentBackend,
    P: FnMut(&str, f32),
{
    let layout = context.config.layout;
    let sheets: Vec<&[PageRef]> = sequence.chunks(layout.pages_in_sheet()).collect();
    let total = sheets.len();

    for (index, sheet) in sheets.into_iter().enumerate() {
        cancel.check()?;
        progress(
            &format!("creating page {}", index + 1),
            index as f32 / total as f32,
        );

        let (width, height) = context.output_size;
        let page = backend.new_blank_page(width, height)?;
        for (slot, entry) in layout.slots().zip(sheet) {
            let Some(source) = *entry else {
                continue;
            };
            let placement = tile_placement(layout, context.input_size, context.output_size, slot);
            backend.composite(page, source, placement)?;
        }
        log::debug!("Created output page {} of {}", index + 1, total);
    }

    Ok(total)
}

/// Cut every input sheet into its tiles and insert each tile as a full
/// output page at the position `sequence` gives for it (linearize).
///
/// Returns the number of pages created.
pub(crate) fn extract_tiles<B, P>(
    backend: &mut B,
    context: &ConversionContext,
    sequence: &[PageRef],
    progress: &mut P,
    cancel: &CancelToken,
) -> Result<usize>
where
    B: DocumentBackend,
    P: FnMut(&str, f32),
{
    let layout = context.config.layout;
    let per_sheet = layout.pages_in_sheet();
    let total = sequence.len();
    let (width, height) = context.output_size;
    let mut created = 0;

    for source in 0..context.page_count {
        for slot in layout.slots() {
            let k = source * per_sheet + slot.row * layout.pages_in_width + slot.col;
            let Some(position) = sequence.get(k).copied().flatten() else {
                continue;
            };

            cancel.check()?;
            progress(
                &format!("extracting page {}", k + 1),
                k as f32 / total as f32,
            );

            let page = backend.insert_blank_page(width, height, position)?;
            let placement =
                extract_placement(layout, context.input_size, context.output_size, slot);
            backend.composite(page, source, placement)?;
            created += 1;
        }
    }

    Ok(created)
}
