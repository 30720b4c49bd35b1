//! PDF rendering modules for conversion
//!
//! This module handles all document-specific operations:
//! - The backend trait the converter drives
//! - The lopdf backend (XObjects, output pages, deep copies)

mod backend;
mod page;
mod pdf;
mod xobject;

pub use backend::DocumentBackend;
pub use pdf::{PageHandle, PdfBackend};
pub use xobject::{copy_object_deep, create_page_xobject, get_page_dimensions};
