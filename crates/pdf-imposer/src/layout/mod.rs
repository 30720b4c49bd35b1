//! Layout calculation modules for page conversion
//!
//! This module handles all the pure calculations behind a conversion:
//! - Layout and paper format parsing
//! - Output orientation resolution
//! - Page sequence ordering (which source page goes where)
//! - Tile placement (scale and translation)

mod format;
mod orientation;
mod placement;
mod sequence;
mod types;

pub use format::*;
pub use orientation::*;
pub use placement::*;
pub use sequence::*;
pub use types::*;
