//! Document capabilities needed by the converter
//!
//! The conversion engine never touches a file format directly. It reads
//! the source and builds the output through this trait, which is
//! implemented once per document backend.

use crate::layout::Placement;
use crate::types::Result;

/// Read access to the source document and write access to the output
pub trait DocumentBackend {
    /// Handle to a page of the output document
    type Page: Copy;

    /// Number of pages in the source document
    fn page_count(&self) -> usize;

    /// Size (width, height) in points of source page `index`
    fn page_size(&self, index: usize) -> Result<(f32, f32)>;

    /// Append a blank page to the output
    fn new_blank_page(&mut self, width: f32, height: f32) -> Result<Self::Page>;

    /// Insert a blank page at output position `at`; positions past the end append
    fn insert_blank_page(&mut self, width: f32, height: f32, at: usize) -> Result<Self::Page>;

    /// Merge a scaled, translated copy of source page `source` into `dest`
    fn composite(&mut self, dest: Self::Page, source: usize, placement: Placement) -> Result<()>;

    /// Finalize the output document
    fn persist(&mut self) -> Result<()>;
}
