//! lopdf implementation of [`DocumentBackend`]

use std::collections::HashMap;

use lopdf::{Document, Object, ObjectId};

use super::backend::DocumentBackend;
use super::page::{OutputPage, finalize_document};
use super::xobject::{create_page_xobject, get_page_dimensions};
use crate::layout::Placement;
use crate::types::{ImposeError, Result};

/// Handle to a page of the output document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageHandle(usize);

/// Converts between in-memory lopdf documents.
///
/// Output pages live in an arena addressed by [`PageHandle`]; their order
/// in the output is kept separately so that pages can be inserted at any
/// position without invalidating handles.
pub struct PdfBackend {
    source: Document,
    source_page_ids: Vec<ObjectId>,
    output: Document,
    pages_tree_id: ObjectId,
    pages: Vec<OutputPage>,
    order: Vec<usize>,
    object_cache: HashMap<ObjectId, ObjectId>,
    xobjects: HashMap<usize, ObjectId>,
    persisted: bool,
}

impl PdfBackend {
    pub fn new(source: Document) -> Self {
        let source_page_ids: Vec<ObjectId> = source.get_pages().values().copied().collect();
        let mut output = Document::with_version("1.7");
        let pages_tree_id = output.new_object_id();

        Self {
            source,
            source_page_ids,
            output,
            pages_tree_id,
            pages: Vec::new(),
            order: Vec::new(),
            object_cache: HashMap::new(),
            xobjects: HashMap::new(),
            persisted: false,
        }
    }

    /// Number of pages added to the output so far
    pub fn output_page_count(&self) -> usize {
        self.order.len()
    }

    /// Take the output document.
    ///
    /// Returns `None` unless [`DocumentBackend::persist`] has completed, so a
    /// cancelled or failed conversion never yields a partial document.
    pub fn into_document(self) -> Option<Document> {
        self.persisted.then_some(self.output)
    }

    fn source_page_id(&self, index: usize) -> Result<ObjectId> {
        self.source_page_ids
            .get(index)
            .copied()
            .ok_or(ImposeError::PageOutOfRange {
                index,
                count: self.source_page_ids.len(),
            })
    }

    fn page_xobject(&mut self, index: usize) -> Result<ObjectId> {
        if let Some(&id) = self.xobjects.get(&index) {
            return Ok(id);
        }
        let page_id = self.source_page_id(index)?;
        let id = create_page_xobject(
            &mut self.output,
            &self.source,
            page_id,
            &mut self.object_cache,
        )?;
        self.xobjects.insert(index, id);
        Ok(id)
    }

    fn push_page(&mut self, width: f32, height: f32) -> usize {
        self.pages.push(OutputPage::new(width, height));
        self.pages.len() - 1
    }
}

impl DocumentBackend for PdfBackend {
    type Page = PageHandle;

    fn page_count(&self) -> usize {
        self.source_page_ids.len()
    }

    fn page_size(&self, index: usize) -> Result<(f32, f32)> {
        get_page_dimensions(&self.source, self.source_page_id(index)?)
    }

    fn new_blank_page(&mut self, width: f32, height: f32) -> Result<PageHandle> {
        let slot = self.push_page(width, height);
        self.order.push(slot);
        Ok(PageHandle(slot))
    }

    fn insert_blank_page(&mut self, width: f32, height: f32, at: usize) -> Result<PageHandle> {
        let slot = self.push_page(width, height);
        let at = at.min(self.order.len());
        self.order.insert(at, slot);
        Ok(PageHandle(slot))
    }

    fn composite(&mut self, dest: PageHandle, source: usize, placement: Placement) -> Result<()> {
        let xobject_id = self.page_xobject(source)?;
        let count = self.pages.len();
        let page = self
            .pages
            .get_mut(dest.0)
            .ok_or(ImposeError::PageOutOfRange {
                index: dest.0,
                count,
            })?;
        page.place(xobject_id, placement);
        Ok(())
    }

    fn persist(&mut self) -> Result<()> {
        if self.persisted {
            return Ok(());
        }

        let mut page_refs = Vec::with_capacity(self.order.len());
        for &slot in &self.order {
            let page_id = self.pages[slot].render(&mut self.output, self.pages_tree_id);
            page_refs.push(Object::Reference(page_id));
        }
        finalize_document(&mut self.output, self.pages_tree_id, page_refs);
        self.output.compress();

        self.persisted = true;
        log::debug!("Output document finalized with {} pages", self.order.len());
        Ok(())
    }
}
