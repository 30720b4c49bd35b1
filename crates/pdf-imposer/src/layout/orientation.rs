//! Output orientation resolution
//!
//! Tiling pages on a sheet may require the output paper to be turned.
//! When one layout dimension is exactly twice the other, the tiles are
//! rotated relative to the sheet, which only works for one input
//! orientation. Otherwise the output simply follows the input.

use crate::types::{ConversionType, ImposeError, Orientation, Result};

use super::Layout;

/// Whether pages get smaller (several per sheet) or larger (one tile per page)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeDirection {
    /// Input pages are tiled onto larger sheets (bookletize, reduce)
    Doubling,
    /// Tiles are extracted onto full pages (linearize)
    Halving,
}

impl ResizeDirection {
    pub fn for_conversion(conversion_type: ConversionType) -> Self {
        match conversion_type {
            ConversionType::Bookletize | ConversionType::Reduce => ResizeDirection::Doubling,
            ConversionType::Linearize => ResizeDirection::Halving,
        }
    }

    fn relates(self, a: usize, b: usize) -> bool {
        match self {
            ResizeDirection::Doubling => a == 2 * b,
            ResizeDirection::Halving => b == 2 * a,
        }
    }
}

/// Decide the output orientation for the given input orientation and layout.
///
/// `output` is the orientation of the requested paper format. The result is
/// a pure function of the arguments and resolving again with the returned
/// orientation gives the same answer.
pub fn resolve_output_orientation(
    input: Orientation,
    layout: Layout,
    output: Orientation,
    direction: ResizeDirection,
) -> Result<Orientation> {
    let width = layout.pages_in_width;
    let height = layout.pages_in_height;

    let mismatch = || ImposeError::MismatchedOrientation {
        layout: layout.to_string(),
    };

    if direction.relates(width, height) {
        if input != Orientation::Portrait {
            return Err(mismatch());
        }
        Ok(match output {
            Orientation::Portrait => Orientation::Landscape,
            other => other,
        })
    } else if direction.relates(height, width) {
        if input != Orientation::Landscape {
            return Err(mismatch());
        }
        Ok(match output {
            Orientation::Landscape => Orientation::Portrait,
            other => other,
        })
    } else {
        Ok(match (input, output) {
            (Orientation::Landscape, Orientation::Portrait) => Orientation::Landscape,
            (Orientation::Portrait, Orientation::Landscape) => Orientation::Portrait,
            _ => output,
        })
    }
}

/// Resolve the orientation and return the output size turned accordingly
pub fn resolve_output_size(
    input_size: (f32, f32),
    layout: Layout,
    output_size: (f32, f32),
    direction: ResizeDirection,
) -> Result<(f32, f32)> {
    let input = Orientation::of(input_size.0, input_size.1);
    let output = Orientation::of(output_size.0, output_size.1);
    let resolved = resolve_output_orientation(input, layout, output, direction)?;
    if resolved != output {
        log::debug!(
            "Turning output paper from {:?} to {:?} for layout {}",
            output,
            resolved,
            layout
        );
    }
    Ok(resolved.apply(output_size))
}
