//! Output page assembly
//!
//! An output page collects placement commands while a conversion runs and
//! is turned into a PDF page dictionary once the document is persisted.

use crate::layout::Placement;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// An output page under construction
#[derive(Debug, Clone)]
pub(crate) struct OutputPage {
    width_pt: f32,
    height_pt: f32,
    xobjects: Dictionary,
    content_ops: Vec<String>,
}

impl OutputPage {
    pub(crate) fn new(width_pt: f32, height_pt: f32) -> Self {
        Self {
            width_pt,
            height_pt,
            xobjects: Dictionary::new(),
            content_ops: Vec::new(),
        }
    }

    /// Draw the given XObject with `placement` applied
    pub(crate) fn place(&mut self, xobject_id: ObjectId, placement: Placement) {
        let xobject_name = format!("P{}", self.content_ops.len());
        self.xobjects
            .set(xobject_name.as_bytes(), Object::Reference(xobject_id));
        self.content_ops
            .push(generate_placement_command(&xobject_name, placement));
    }

    /// Write the page into `output` and return its object ID
    pub(crate) fn render(&self, output: &mut Document, parent_pages_id: ObjectId) -> ObjectId {
        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(parent_pages_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(self.width_pt),
                Object::Real(self.height_pt),
            ]),
        );

        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(self.xobjects.clone()));

        let content = self.content_ops.join("");
        let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        page_dict.set("Contents", Object::Reference(content_id));
        page_dict.set("Resources", Object::Dictionary(resources));

        output.add_object(page_dict)
    }
}

/// Generate the PDF content stream command to draw a page XObject.
fn generate_placement_command(xobject_name: &str, placement: Placement) -> String {
    format!(
        "q {} 0 0 {} {} {} cm /{} Do Q\n",
        placement.scale, placement.scale, placement.dx, placement.dy, xobject_name
    )
}

/// Create the pages tree and catalog for the given pages
pub(crate) fn finalize_document(
    output: &mut Document,
    pages_tree_id: ObjectId,
    page_refs: Vec<Object>,
) {
    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));

    output.trailer.set("Root", catalog_id);
}
