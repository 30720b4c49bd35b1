pub mod constants;
pub mod convert;
pub mod layout;
mod options;
pub mod render;
mod stats;
mod types;

pub use convert::{
    CancelToken, ConversionContext, Converter, convert, convert_document, convert_file,
    default_output_path, load_pdf, save_pdf,
};
pub use layout::{Layout, PaperFormat};
pub use options::*;
pub use render::{DocumentBackend, PdfBackend};
pub use stats::calculate_statistics;
pub use types::*;
