use pdf_imposer::layout::Placement;
use pdf_imposer::*;

const A5_PORTRAIT: (f32, f32) = (420.0, 595.0);
const A4_LANDSCAPE: (f32, f32) = (842.0, 595.0);

#[derive(Debug, Default)]
struct RecordedPage {
    size: (f32, f32),
    tiles: Vec<(usize, Placement)>,
}

/// In-memory backend that records every call
#[derive(Debug, Default)]
struct RecordingBackend {
    page_count: usize,
    page_size: (f32, f32),
    pages: Vec<RecordedPage>,
    order: Vec<usize>,
    persisted: bool,
}

impl RecordingBackend {
    fn new(page_count: usize, page_size: (f32, f32)) -> Self {
        Self {
            page_count,
            page_size,
            ..Default::default()
        }
    }

    /// Output pages in document order
    fn output(&self) -> Vec<&RecordedPage> {
        self.order.iter().map(|&slot| &self.pages[slot]).collect()
    }
}

impl DocumentBackend for RecordingBackend {
    type Page = usize;

    fn page_count(&self) -> usize {
        self.page_count
    }

    fn page_size(&self, index: usize) -> Result<(f32, f32)> {
        if index < self.page_count {
            Ok(self.page_size)
        } else {
            Err(ImposeError::PageOutOfRange {
                index,
                count: self.page_count,
            })
        }
    }

    fn new_blank_page(&mut self, width: f32, height: f32) -> Result<usize> {
        self.pages.push(RecordedPage {
            size: (width, height),
            tiles: Vec::new(),
        });
        self.order.push(self.pages.len() - 1);
        Ok(self.pages.len() - 1)
    }

    fn insert_blank_page(&mut self, width: f32, height: f32, at: usize) -> Result<usize> {
        self.pages.push(RecordedPage {
            size: (width, height),
            tiles: Vec::new(),
        });
        let at = at.min(self.order.len());
        self.order.insert(at, self.pages.len() - 1);
        Ok(self.pages.len() - 1)
    }

    fn composite(&mut self, dest: usize, source: usize, placement: Placement) -> Result<()> {
        assert!(source < self.page_count, "composited a missing source page");
        self.pages[dest].tiles.push((source, placement));
        Ok(())
    }

    fn persist(&mut self) -> Result<()> {
        self.persisted = true;
        Ok(())
    }
}

fn options(conversion_type: ConversionType, layout: &str, copy_pages: bool) -> ConversionOptions {
    ConversionOptions {
        conversion_type,
        layout: layout.to_string(),
        copy_pages,
        ..Default::default()
    }
}

fn run(
    backend: RecordingBackend,
    options: &ConversionOptions,
) -> (Converter<RecordingBackend>, Result<ConversionSummary>, Vec<(String, f32)>) {
    let mut reports = Vec::new();
    let mut converter = Converter::configure(backend, options);
    let result = converter.run(
        |message: &str, fraction: f32| reports.push((message.to_string(), fraction)),
        &CancelToken::new(),
    );
    (converter, result, reports)
}

#[test]
fn test_bookletize_five_pages() {
    let backend = RecordingBackend::new(5, A5_PORTRAIT);
    let (converter, result, reports) =
        run(backend, &options(ConversionType::Bookletize, "2x1", false));

    let summary = result.unwrap();
    assert_eq!(summary.source_pages, 5);
    assert_eq!(summary.output_pages, 4);
    assert_eq!(converter.state(), ConversionState::Completed);

    let backend = converter.backend();
    assert!(backend.persisted);
    let output = backend.output();
    assert_eq!(output.len(), 4);
    // A4 is turned to landscape for two portrait pages side by side
    assert!(output.iter().all(|page| page.size == A4_LANDSCAPE));

    let sources: Vec<Vec<usize>> = output
        .iter()
        .map(|page| page.tiles.iter().map(|(source, _)| *source).collect())
        .collect();
    assert_eq!(sources, vec![vec![0], vec![1], vec![2], vec![3, 4]]);

    // Page 0 sits in the right half of the first side
    let (_, placement) = output[0].tiles[0];
    assert_eq!(placement.dx, 421.0);
    assert_eq!(placement.dy, 0.0);

    assert_eq!(reports.len(), 5);
    assert_eq!(reports[0].0, "creating page 1");
    assert_eq!(reports.last(), Some(&("done".to_string(), 1.0)));
    assert!(reports.windows(2).all(|w| w[0].1 <= w[1].1));
}

#[test]
fn test_reduce_copy_pages() {
    let backend = RecordingBackend::new(4, A5_PORTRAIT);
    let (converter, result, _) = run(backend, &options(ConversionType::Reduce, "2x2", true));

    assert_eq!(result.unwrap().output_pages, 4);
    for (index, page) in converter.backend().output().iter().enumerate() {
        assert_eq!(page.tiles.len(), 4);
        assert!(page.tiles.iter().all(|(source, _)| *source == index));
    }
}

#[test]
fn test_reduce_geometry() {
    let backend = RecordingBackend::new(2, A5_PORTRAIT);
    let (converter, result, _) = run(backend, &options(ConversionType::Reduce, "2x1", false));
    result.unwrap();

    let output = converter.backend().output();
    assert_eq!(output.len(), 1);
    let (source, placement) = output[0].tiles[1];
    assert_eq!(source, 1);
    assert!((placement.scale - 842.0 / (2.0 * 420.0)).abs() < 1e-6);
    assert_eq!(placement.dx, 421.0);
    assert_eq!(placement.dy, 0.0);
}

#[test]
fn test_linearize_restores_reading_order() {
    // Two booklet sides: [3, 0] and [1, 2]
    let backend = RecordingBackend::new(2, A4_LANDSCAPE);
    let (converter, result, reports) =
        run(backend, &options(ConversionType::Linearize, "2x1", false));

    assert_eq!(result.unwrap().output_pages, 4);
    let output = converter.backend().output();
    assert!(output.iter().all(|page| page.size == (595.0, 842.0)));

    // (source sheet, tile column) in output order
    let tiles: Vec<(usize, f32)> = output
        .iter()
        .map(|page| {
            assert_eq!(page.tiles.len(), 1);
            let (source, placement) = page.tiles[0];
            (source, placement.dx)
        })
        .collect();
    assert_eq!(tiles, vec![(0, -595.0), (1, 0.0), (1, -595.0), (0, 0.0)]);

    let (_, placement) = output[0].tiles[0];
    assert!((placement.scale - 2.0 * 595.0 / 842.0).abs() < 1e-6);

    assert_eq!(reports[0].0, "extracting page 1");
    assert_eq!(reports.len(), 5);
}

#[test]
fn test_landscape_input_rejected_for_booklet() {
    let backend = RecordingBackend::new(4, A4_LANDSCAPE);
    let (converter, result, reports) =
        run(backend, &options(ConversionType::Bookletize, "2x1", false));

    match result {
        Err(ImposeError::MismatchedOrientation { layout }) => assert_eq!(layout, "2x1"),
        other => panic!("Expected MismatchedOrientation, got {:?}", other),
    }
    assert_eq!(converter.state(), ConversionState::Configuring);
    assert!(converter.backend().pages.is_empty());
    assert!(!converter.backend().persisted);
    assert!(reports.is_empty());
}

#[test]
fn test_empty_document_reports_done_once() {
    let backend = RecordingBackend::new(0, A5_PORTRAIT);
    let (converter, result, reports) =
        run(backend, &options(ConversionType::Bookletize, "2x1", false));

    assert_eq!(result.unwrap().output_pages, 0);
    assert!(converter.backend().persisted);
    assert_eq!(reports, vec![("done".to_string(), 1.0)]);
}

#[test]
fn test_cancel_stops_before_persist() {
    let cancel = CancelToken::new();
    let trip = cancel.clone();
    let mut reports = 0;

    let mut converter = Converter::configure(
        RecordingBackend::new(16, A5_PORTRAIT),
        &options(ConversionType::Bookletize, "2x1", false),
    );
    let result = converter.run(
        |_: &str, _: f32| {
            reports += 1;
            trip.cancel();
        },
        &cancel,
    );

    assert!(matches!(result, Err(ImposeError::Cancelled)));
    assert_eq!(converter.state(), ConversionState::Cancelled);
    assert_eq!(reports, 1);
    assert_eq!(converter.backend().pages.len(), 1);
    assert!(!converter.backend().persisted);
}

#[test]
fn test_terminal_state_is_final() {
    let backend = RecordingBackend::new(4, A5_PORTRAIT);
    let (mut converter, result, _) =
        run(backend, &options(ConversionType::Reduce, "2x1", false));
    result.unwrap();

    let again = converter.run(|_: &str, _: f32| {}, &CancelToken::new());
    assert!(matches!(
        again,
        Err(ImposeError::InvalidState(ConversionState::Completed))
    ));
    assert!(matches!(
        converter.validate(),
        Err(ImposeError::InvalidState(ConversionState::Completed))
    ));
}

#[test]
fn test_validate_resolves_context() {
    let mut converter = Converter::configure(
        RecordingBackend::new(3, A5_PORTRAIT),
        &options(ConversionType::Bookletize, "2x1", false),
    );
    assert_eq!(converter.state(), ConversionState::Configuring);
    assert!(converter.context().is_none());

    let context = converter.validate().unwrap();
    assert_eq!(context.page_count, 3);
    assert_eq!(context.input_size, A5_PORTRAIT);
    assert_eq!(context.output_size, A4_LANDSCAPE);
    assert_eq!(converter.state(), ConversionState::Validated);
}

#[test]
fn test_bad_options_fail_validation() {
    let mut bad_layout = options(ConversionType::Reduce, "2-1", false);
    let mut converter = Converter::configure(RecordingBackend::new(3, A5_PORTRAIT), &bad_layout);
    assert!(matches!(converter.validate(), Err(ImposeError::Config(_))));
    assert_eq!(converter.state(), ConversionState::Configuring);
    assert!(converter.context().is_none());

    bad_layout.layout = "2x1".to_string();
    bad_layout.paper_format = "B5".to_string();
    let mut converter = Converter::configure(RecordingBackend::new(3, A5_PORTRAIT), &bad_layout);
    match converter.validate() {
        Err(ImposeError::UnknownFormat { name }) => assert_eq!(name, "B5"),
        other => panic!("Expected UnknownFormat, got {:?}", other.map(|_| ())),
    }
    assert_eq!(converter.state(), ConversionState::Configuring);
}

#[test]
fn test_backend_error_fails_conversion() {
    let mut converter = Converter::configure(
        FailingBackend,
        &options(ConversionType::Bookletize, "2x1", false),
    );
    assert!(matches!(
        converter.validate(),
        Err(ImposeError::PageOutOfRange { index: 0, count: 0 })
    ));
    assert_eq!(converter.state(), ConversionState::Failed);
    assert!(matches!(
        converter.run(|_: &str, _: f32| {}, &CancelToken::new()),
        Err(ImposeError::InvalidState(ConversionState::Failed))
    ));
}

/// Backend claiming pages it cannot read
struct FailingBackend;

impl DocumentBackend for FailingBackend {
    type Page = ();

    fn page_count(&self) -> usize {
        2
    }

    fn page_size(&self, index: usize) -> Result<(f32, f32)> {
        Err(ImposeError::PageOutOfRange { index, count: 0 })
    }

    fn new_blank_page(&mut self, _: f32, _: f32) -> Result<()> {
        Ok(())
    }

    fn insert_blank_page(&mut self, _: f32, _: f32, _: usize) -> Result<()> {
        Ok(())
    }

    fn composite(&mut self, _: (), _: usize, _: Placement) -> Result<()> {
        Ok(())
    }

    fn persist(&mut self) -> Result<()> {
        Ok(())
    }
}
