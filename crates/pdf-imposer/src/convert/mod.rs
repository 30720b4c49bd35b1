//! Page conversion - booklets, linearization and reduction
//!
//! This module orchestrates a conversion:
//! 1. Parse the layout and paper format
//! 2. Resolve the output orientation against the source pages
//! 3. Generate the page sequence
//! 4. Composite source pages onto output pages and persist

mod compositor;
mod io;

pub use io::{default_output_path, load_pdf, save_pdf};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use lopdf::Document;

use crate::layout::{ResizeDirection, generate_sequence, resolve_output_size};
use crate::options::{ConversionConfig, ConversionOptions};
use crate::render::{DocumentBackend, PdfBackend};
use crate::types::*;
use compositor::{compose_sheets, extract_tiles};

// =============================================================================
// Cancellation
// =============================================================================

/// Shared flag that stops a running conversion at its next progress point
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Clear the flag so the token can be reused for another conversion
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub(crate) fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(ImposeError::Cancelled)
        } else {
            Ok(())
        }
    }
}

// =============================================================================
// Converter
// =============================================================================

/// Everything a validated conversion needs to know about its source
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionContext {
    pub config: ConversionConfig,
    pub page_count: usize,
    /// Size of the first source page, or the default page size for an empty source
    pub input_size: (f32, f32),
    /// Paper size turned to the orientation the layout needs
    pub output_size: (f32, f32),
}

/// Runs one conversion over a document backend.
///
/// A converter goes through `Configuring -> Validated -> Running` and ends
/// in `Completed`, `Failed` or `Cancelled`. Terminal states are final.
pub struct Converter<B: DocumentBackend> {
    backend: B,
    options: ConversionOptions,
    context: Option<ConversionContext>,
    state: ConversionState,
}

impl<B: DocumentBackend> Converter<B> {
    /// Create a converter. Nothing is read until [`Converter::validate`].
    pub fn configure(backend: B, options: &ConversionOptions) -> Self {
        Self {
            backend,
            options: options.clone(),
            context: None,
            state: ConversionState::Configuring,
        }
    }

    pub fn state(&self) -> ConversionState {
        self.state
    }

    pub fn context(&self) -> Option<&ConversionContext> {
        self.context.as_ref()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Parse the options and check them against the source document
    pub fn validate(&mut self) -> Result<&ConversionContext> {
        match self.state {
            ConversionState::Configuring => {}
            ConversionState::Validated => {}
            state => return Err(ImposeError::InvalidState(state)),
        }

        if self.context.is_none() {
            // Configuration errors leave the converter untouched; only a
            // failing backend ends it
            let context = self.build_context().inspect_err(|e| {
                if !e.is_configuration_error() {
                    self.state = ConversionState::Failed;
                }
            })?;
            self.context = Some(context);
        }

        self.state = ConversionState::Validated;
        self.context
            .as_ref()
            .ok_or(ImposeError::InvalidState(ConversionState::Configuring))
    }

    fn build_context(&self) -> Result<ConversionContext> {
        let config = self.options.validate()?;
        let page_count = self.backend.page_count();
        let paper_size = config.paper.size();

        if page_count == 0 {
            return Ok(ConversionContext {
                config,
                page_count,
                input_size: crate::constants::DEFAULT_PAGE_DIMENSIONS,
                output_size: paper_size,
            });
        }

        let input_size = self.backend.page_size(0)?;
        let output_size = resolve_output_size(
            input_size,
            config.layout,
            paper_size,
            ResizeDirection::for_conversion(config.conversion_type),
        )?;

        Ok(ConversionContext {
            config,
            page_count,
            input_size,
            output_size,
        })
    }

    /// Run the conversion, validating first if needed.
    ///
    /// `progress` receives a message and a fraction in `[0, 1]` once per
    /// output page and a final `("done", 1.0)` after the output is persisted.
    pub fn run<P>(&mut self, mut progress: P, cancel: &CancelToken) -> Result<ConversionSummary>
    where
        P: FnMut(&str, f32),
    {
        if self.state != ConversionState::Validated {
            self.validate()?;
        }
        self.state = ConversionState::Running;

        match self.execute(&mut progress, cancel) {
            Ok(summary) => {
                self.state = ConversionState::Completed;
                progress("done", 1.0);
                Ok(summary)
            }
            Err(ImposeError::Cancelled) => {
                log::info!("Conversion cancelled");
                self.state = ConversionState::Cancelled;
                Err(ImposeError::Cancelled)
            }
            Err(e) => {
                self.state = ConversionState::Failed;
                Err(e)
            }
        }
    }

    fn execute<P>(&mut self, progress: &mut P, cancel: &CancelToken) -> Result<ConversionSummary>
    where
        P: FnMut(&str, f32),
    {
        let context = self
            .context
            .clone()
            .ok_or(ImposeError::InvalidState(self.state))?;
        let config = &context.config;

        log::info!(
            "Starting {:?} of {} pages, layout {}, paper {}",
            config.conversion_type,
            context.page_count,
            config.layout,
            config.paper.name
        );

        let sequence = generate_sequence(
            config.conversion_type,
            context.page_count,
            config.layout,
            config.copy_pages,
        );

        cancel.check()?;
        let output_pages = match config.conversion_type {
            ConversionType::Bookletize | ConversionType::Reduce => {
                compose_sheets(&mut self.backend, &context, &sequence, progress, cancel)?
            }
            ConversionType::Linearize => {
                extract_tiles(&mut self.backend, &context, &sequence, progress, cancel)?
            }
        };

        cancel.check()?;
        log::info!("writing converted file");
        self.backend.persist()?;

        log::info!(
            "Conversion finished: {} source pages, {} output pages",
            context.page_count,
            output_pages
        );

        Ok(ConversionSummary {
            conversion_type: config.conversion_type,
            source_pages: context.page_count,
            output_pages,
        })
    }
}

// =============================================================================
// lopdf entry points
// =============================================================================

/// Convert an in-memory document
pub fn convert_document<P>(
    source: Document,
    options: &ConversionOptions,
    progress: P,
    cancel: &CancelToken,
) -> Result<(Document, ConversionSummary)>
where
    P: FnMut(&str, f32),
{
    let mut converter = Converter::configure(PdfBackend::new(source), options);
    let summary = converter.run(progress, cancel)?;
    let document = converter
        .into_backend()
        .into_document()
        .ok_or(ImposeError::InvalidState(ConversionState::Running))?;
    Ok((document, summary))
}

/// Convert a document on the blocking thread pool
pub async fn convert<P>(
    source: Document,
    options: &ConversionOptions,
    progress: P,
    cancel: CancelToken,
) -> Result<(Document, ConversionSummary)>
where
    P: FnMut(&str, f32) + Send + 'static,
{
    let options = options.clone();

    tokio::task::spawn_blocking(move || convert_document(source, &options, progress, &cancel))
        .await?
}

/// Load `options.input_file`, convert it and save the result.
///
/// The output goes to `options.output_file`, or next to the input with a
/// `-conv.pdf` suffix.
pub async fn convert_file<P>(
    options: &ConversionOptions,
    progress: P,
    cancel: CancelToken,
) -> Result<ConversionSummary>
where
    P: FnMut(&str, f32) + Send + 'static,
{
    let input = options
        .input_file
        .clone()
        .ok_or_else(|| ImposeError::Config("No input file specified".to_string()))?;
    let output = options
        .output_file
        .clone()
        .unwrap_or_else(|| default_output_path(&input));

    // Reject bad options before touching the file system
    options.validate()?;

    let source = load_pdf(&input).await?;
    let (document, summary) = convert(source, options, progress, cancel).await?;
    save_pdf(document, &output).await?;

    log::info!("Saved {}", output.display());
    Ok(summary)
}
