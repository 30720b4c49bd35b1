use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImposeError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("The page format \"{name}\" is unknown")]
    UnknownFormat { name: String },
    #[error("The layout {layout} is incompatible with the input page orientation")]
    MismatchedOrientation { layout: String },
    #[error("Page {index} is out of range (document has {count} pages)")]
    PageOutOfRange { index: usize, count: usize },
    #[error("Conversion cancelled")]
    Cancelled,
    #[error("Converter cannot run from the {0:?} state")]
    InvalidState(ConversionState),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl ImposeError {
    /// Whether the error comes from the requested options rather than from
    /// reading or writing a document
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            ImposeError::Config(_)
                | ImposeError::UnknownFormat { .. }
                | ImposeError::MismatchedOrientation { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ImposeError>;

/// A source page index, or `None` for a blank slot.
///
/// For linearization the value is an insertion position in the output
/// document rather than a source index.
pub type PageRef = Option<usize>;

/// Page orientation, derived from a (width, height) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width (default for every table format)
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
    /// Width equals height
    Square,
}

impl Orientation {
    pub fn of(width: f32, height: f32) -> Self {
        if height > width {
            Orientation::Portrait
        } else if width > height {
            Orientation::Landscape
        } else {
            Orientation::Square
        }
    }

    /// Swap `size` if needed so that it has this orientation.
    ///
    /// Square sizes and `Orientation::Square` leave the size untouched.
    pub fn apply(self, size: (f32, f32)) -> (f32, f32) {
        let (w, h) = size;
        match self {
            Orientation::Portrait if w > h => (h, w),
            Orientation::Landscape if h > w => (h, w),
            _ => (w, h),
        }
    }
}

/// The three page rearrangements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConversionType {
    /// Linear document to saddle-stitch booklet
    #[default]
    Bookletize,
    /// Booklet back to linear reading order
    Linearize,
    /// Tile several input pages on each output page, no reordering
    Reduce,
}

/// Lifecycle of a single `Converter`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionState {
    Configuring,
    Validated,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl ConversionState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ConversionState::Completed | ConversionState::Failed | ConversionState::Cancelled
        )
    }
}

/// Outcome of a completed conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionSummary {
    pub conversion_type: ConversionType,
    /// Number of pages read from the source
    pub source_pages: usize,
    /// Number of pages written to the output
    pub output_pages: usize,
}

/// Statistics about a conversion, computed without touching the output
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionStatistics {
    /// Total number of source pages
    pub source_pages: usize,
    /// Source pages (or tiles) per output sheet
    pub pages_per_sheet: usize,
    /// Length of the generated page sequence
    pub sequence_len: usize,
    /// Output page count
    pub output_pages: usize,
    /// Number of empty slots in the sequence
    pub blank_slots: usize,
}
