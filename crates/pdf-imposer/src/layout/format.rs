//! Layout string parsing and paper format lookup

use std::str::FromStr;

use crate::constants::{MAX_PAGES_PER_SHEET, PAPER_FORMATS, ROTATED_FORMAT_SUFFIX};
use crate::types::{ImposeError, Orientation, Result};

use super::{Layout, PaperFormat};

// =============================================================================
// Layout Parsing
// =============================================================================

impl FromStr for Layout {
    type Err = ImposeError;

    /// Parse a `WxH` token such as `2x1` or `4x4`.
    fn from_str(value: &str) -> Result<Self> {
        let malformed = || {
            ImposeError::Config(format!(
                "Layout \"{}\" must have the form WxH, e.g. 2x1",
                value
            ))
        };

        let (width, height) = value
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(malformed)?;
        let width: usize = width.trim().parse().map_err(|_| malformed())?;
        let height: usize = height.trim().parse().map_err(|_| malformed())?;

        Layout::new(width, height).ok_or_else(|| {
            ImposeError::Config(format!(
                "Layout \"{}\" must use positive page counts, at most {} per sheet",
                value, MAX_PAGES_PER_SHEET
            ))
        })
    }
}

/// Parse a layout string
pub fn parse_layout(value: &str) -> Result<Layout> {
    value.parse()
}

// =============================================================================
// Paper Formats
// =============================================================================

impl PaperFormat {
    /// Look up a named format.
    ///
    /// When a name appears more than once in the table the last entry is used.
    /// A trailing `R` (e.g. `A4R`) selects the landscape variant of a known format.
    pub fn lookup(name: &str) -> Result<Self> {
        if let Some((width_pt, height_pt)) = table_entry(name) {
            return Ok(Self {
                name: name.to_string(),
                width_pt,
                height_pt,
            });
        }

        let rotated = name
            .strip_suffix(ROTATED_FORMAT_SUFFIX)
            .and_then(table_entry)
            .map(|size| Orientation::Landscape.apply(size));

        match rotated {
            Some((width_pt, height_pt)) => Ok(Self {
                name: name.to_string(),
                width_pt,
                height_pt,
            }),
            None => Err(ImposeError::UnknownFormat {
                name: name.to_string(),
            }),
        }
    }

    /// Distinct format names from the table, sorted
    pub fn names() -> Vec<&'static str> {
        let mut names: Vec<&'static str> = PAPER_FORMATS.iter().map(|(name, _)| *name).collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::of(self.width_pt, self.height_pt)
    }
}

fn table_entry(name: &str) -> Option<(f32, f32)> {
    PAPER_FORMATS
        .iter()
        .rev()
        .find(|(key, _)| *key == name)
        .map(|(_, size)| *size)
}

/// Look up the (width, height) of a named format
pub fn lookup_format(name: &str) -> Result<(f32, f32)> {
    PaperFormat::lookup(name).map(|format| format.size())
}

// =============================================================================
// Tests
// =============================================================================
