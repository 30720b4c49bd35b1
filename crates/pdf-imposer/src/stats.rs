use crate::layout::generate_sequence;
use crate::options::ConversionConfig;
use crate::types::*;

/// Calculate statistics for a conversion of `page_count` source pages
pub fn calculate_statistics(page_count: usize, config: &ConversionConfig) -> ConversionStatistics {
    let sequence = generate_sequence(
        config.conversion_type,
        page_count,
        config.layout,
        config.copy_pages,
    );
    let pages_per_sheet = config.layout.pages_in_sheet();
    let blank_slots = sequence.iter().filter(|entry| entry.is_none()).count();

    let output_pages = match config.conversion_type {
        ConversionType::Bookletize | ConversionType::Reduce => {
            sequence.len().div_ceil(pages_per_sheet)
        }
        // Every non-blank position becomes one output page
        ConversionType::Linearize => sequence.len() - blank_slots,
    };

    ConversionStatistics {
        source_pages: page_count,
        pages_per_sheet,
        sequence_len: sequence.len(),
        output_pages,
        blank_slots,
    }
}
