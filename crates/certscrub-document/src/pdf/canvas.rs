// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF canvas — draw on page 0 of an existing PDF using the `lopdf` crate.
//
// Drawing operations are buffered and written as one extra content stream when
// the canvas is finished. The page's original content is bracketed by `q`/`Q`
// so graphics state it leaves behind cannot leak into the overlay.

use std::collections::HashMap;

use certscrub_core::error::{CertScrubError, Result};
use certscrub_core::{Region, RgbColor};
use lopdf::content::{Content, Operation};
use lopdf::xref::XrefType;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use tracing::{debug, info, instrument, warn};

/// Maximum /Parent hops followed when looking for inherited resources.
const MAX_INHERITANCE_DEPTH: usize = 32;

/// Trailer keys that only make sense for cross-reference streams.
const XREF_STREAM_KEYS: [&[u8]; 8] = [
    b"Type",
    b"W",
    b"Index",
    b"Filter",
    b"DecodeParms",
    b"Length",
    b"XRefStm",
    b"Prev",
];

/// A text run drawn by [`PdfCanvas::draw_text`].
#[derive(Debug, Clone)]
pub struct TextRun<'a> {
    /// Font resource name returned by [`PdfCanvas::register_standard_font`].
    pub font: &'a [u8],
    /// Graphics state resource name carrying the opacity, if any.
    pub graphics_state: Option<&'a [u8]>,
    pub size: f32,
    pub leading: f32,
    pub x: f32,
    pub y: f32,
    pub color: RgbColor,
    /// Text already encoded for the font.
    pub encoded: Vec<u8>,
}

/// Mutable drawing surface over the first page of a loaded PDF.
pub struct PdfCanvas {
    document: Document,
    page_id: ObjectId,
    page_count: usize,
    operations: Vec<Operation>,
    /// Base font name -> resource name, so each font is embedded once.
    fonts: HashMap<&'static str, Vec<u8>>,
    /// Opacity (as bits) -> resource name.
    graphics_states: HashMap<u32, Vec<u8>>,
}

impl PdfCanvas {
    // -- Construction ---------------------------------------------------------

    /// Parse `data` and select its first page.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn load(data: &[u8]) -> Result<Self> {
        let mut document = Document::load_mem(data)
            .map_err(|err| CertScrubError::InvalidDocument(format!("{err}")))?;

        if document.trailer.has(b"Encrypt") {
            return Err(CertScrubError::InvalidDocument("encrypted PDF".into()));
        }
        let pages = document.get_pages();
        let page_count = pages.len();
        let page_id = *pages.values().next().ok_or(CertScrubError::EmptyDocument)?;

        drop_compressed_xref(&mut document);

        debug!(pages = page_count, ?page_id, "PDF loaded for editing");

        Ok(Self {
            document,
            page_id,
            page_count,
            operations: Vec::new(),
            fonts: HashMap::new(),
            graphics_states: HashMap::new(),
        })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the loaded document.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    // -- Drawing --------------------------------------------------------------

    /// Paint an opaque rectangle over `region`.
    pub fn fill_rect(&mut self, region: &Region, color: RgbColor) {
        self.operations.extend([
            Operation::new("q", vec![]),
            fill_color(color),
            Operation::new(
                "re",
                vec![
                    region.x.into(),
                    region.y.into(),
                    region.width.into(),
                    region.height.into(),
                ],
            ),
            Operation::new("f", vec![]),
            Operation::new("Q", vec![]),
        ]);
    }

    /// Paint the XObject `name` through the transformation `matrix`.
    pub fn draw_xobject(&mut self, name: &[u8], matrix: [f32; 6]) {
        self.operations.extend([
            Operation::new("q", vec![]),
            Operation::new("cm", matrix.iter().map(|&v| v.into()).collect()),
            Operation::new("Do", vec![Object::Name(name.to_vec())]),
            Operation::new("Q", vec![]),
        ]);
    }

    /// Show a single line of text.
    pub fn draw_text(&mut self, run: TextRun<'_>) {
        self.operations.push(Operation::new("q", vec![]));
        if let Some(gs) = run.graphics_state {
            self.operations
                .push(Operation::new("gs", vec![Object::Name(gs.to_vec())]));
        }
        self.operations.extend([
            fill_color(run.color),
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![Object::Name(run.font.to_vec()), run.size.into()]),
            Operation::new("TL", vec![run.leading.into()]),
            Operation::new("Td", vec![run.x.into(), run.y.into()]),
            Operation::new(
                "Tj",
                vec![Object::String(run.encoded, StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
            Operation::new("Q", vec![]),
        ]);
    }

    // -- Resources ------------------------------------------------------------

    /// Store an object in the document, returning its id.
    pub fn add_object(&mut self, object: impl Into<Object>) -> ObjectId {
        self.document.add_object(object)
    }

    /// Register an image XObject on the page and return its resource name.
    pub fn register_xobject(&mut self, xobject_id: ObjectId) -> Result<Vec<u8>> {
        self.add_page_resource(b"XObject", "CsIm", xobject_id)
    }

    /// Embed one of the 14 standard Type1 fonts, once per document.
    pub fn register_standard_font(&mut self, base_font: &'static str) -> Result<Vec<u8>> {
        if let Some(name) = self.fonts.get(base_font) {
            return Ok(name.clone());
        }

        let font_id = self.document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => base_font,
            "Encoding" => "WinAnsiEncoding",
        });
        let name = self.add_page_resource(b"Font", "CsF", font_id)?;
        debug!(base_font, name = %String::from_utf8_lossy(&name), "Standard font embedded");
        self.fonts.insert(base_font, name.clone());
        Ok(name)
    }

    /// Register a graphics state with the given fill and stroke opacity.
    pub fn register_opacity(&mut self, alpha: f32) -> Result<Vec<u8>> {
        if let Some(name) = self.graphics_states.get(&alpha.to_bits()) {
            return Ok(name.clone());
        }

        let gs_id = self.document.add_object(dictionary! {
            "Type" => "ExtGState",
            "ca" => alpha,
            "CA" => alpha,
        });
        let name = self.add_page_resource(b"ExtGState", "CsGS", gs_id)?;
        self.graphics_states.insert(alpha.to_bits(), name.clone());
        Ok(name)
    }

    // -- Output ---------------------------------------------------------------

    /// Write the buffered drawing into the page and serialise the document.
    ///
    /// The output uses a classic cross-reference table with no object streams.
    #[instrument(skip_all)]
    pub fn finish(mut self) -> Result<Vec<u8>> {
        if !self.operations.is_empty() {
            let operations = std::mem::take(&mut self.operations);
            let encoded = Content { operations }.encode().map_err(|err| {
                CertScrubError::Serialize(format!("failed to encode overlay content: {err}"))
            })?;
            self.append_overlay(encoded)?;
        }

        let mut output = Vec::new();
        self.document.save_to(&mut output).map_err(|err| {
            CertScrubError::Serialize(format!("failed to serialise PDF: {err}"))
        })?;

        info!(output_bytes = output.len(), pages = self.page_count, "PDF serialised");
        Ok(output)
    }

    // -- Helpers --------------------------------------------------------------

    /// Add `q`/`Q` around the existing page content and append the overlay.
    fn append_overlay(&mut self, overlay: Vec<u8>) -> Result<()> {
        let existing = self.page_dict()?.get(b"Contents").ok().cloned();

        let mut contents = vec![Object::Reference(self.add_content_stream(b"q\n".to_vec()))];
        match existing {
            Some(Object::Reference(id)) => match self.document.get_object(id) {
                Ok(Object::Array(items)) => contents.extend(items.iter().cloned()),
                _ => contents.push(Object::Reference(id)),
            },
            Some(Object::Array(items)) => contents.extend(items),
            Some(other) => {
                warn!(kind = object_kind(&other), "Ignoring malformed /Contents entry");
            }
            None => {}
        }
        contents.push(Object::Reference(
            self.add_content_stream(b"\nQ\n".to_vec()),
        ));

        let mut overlay_bytes = Vec::with_capacity(overlay.len() + 1);
        overlay_bytes.push(b'\n');
        overlay_bytes.extend(overlay);
        contents.push(Object::Reference(self.add_content_stream(overlay_bytes)));

        self.page_dict_mut()?.set("Contents", Object::Array(contents));
        Ok(())
    }

    fn add_content_stream(&mut self, content: Vec<u8>) -> ObjectId {
        self.document
            .add_object(Stream::new(Dictionary::new(), content))
    }

    /// Add `id` under a fresh `prefix<N>` name in the page's `category`
    /// resource dictionary.
    ///
    /// Inherited or indirect resource dictionaries are copied inline onto the
    /// page so that other pages sharing them are not affected.
    fn add_page_resource(
        &mut self,
        category: &[u8],
        prefix: &str,
        id: ObjectId,
    ) -> Result<Vec<u8>> {
        let mut resources = self.effective_resources()?;
        let mut entries = match resources.get(category) {
            Ok(object) => self.resolve_dict(object)?,
            Err(_) => Dictionary::new(),
        };

        let mut index: u32 = 1;
        let name = loop {
            let candidate = format!("{prefix}{index}").into_bytes();
            if !entries.has(&candidate) {
                break candidate;
            }
            index += 1;
        };

        entries.set(name.clone(), Object::Reference(id));
        resources.set(category.to_vec(), Object::Dictionary(entries));
        self.page_dict_mut()?
            .set("Resources", Object::Dictionary(resources));
        Ok(name)
    }

    /// The page's resource dictionary, following /Parent when it is inherited.
    fn effective_resources(&self) -> Result<Dictionary> {
        let mut node = self.page_dict()?;
        for _ in 0..MAX_INHERITANCE_DEPTH {
            if let Ok(resources) = node.get(b"Resources") {
                return self.resolve_dict(resources);
            }
            match node.get(b"Parent") {
                Ok(Object::Reference(parent_id)) => {
                    node = self
                        .document
                        .get_object(*parent_id)
                        .and_then(Object::as_dict)
                        .map_err(|err| {
                            CertScrubError::PdfStructure(format!("bad /Parent node: {err}"))
                        })?;
                }
                _ => break,
            }
        }
        Ok(Dictionary::new())
    }

    /// Owned copy of a dictionary given inline or by reference.
    fn resolve_dict(&self, object: &Object) -> Result<Dictionary> {
        match object {
            Object::Dictionary(dict) => Ok(dict.clone()),
            Object::Reference(id) => self
                .document
                .get_object(*id)
                .and_then(Object::as_dict)
                .cloned()
                .map_err(|err| {
                    CertScrubError::PdfStructure(format!(
                        "resource {id:?} is not a dictionary: {err}"
                    ))
                }),
            other => Err(CertScrubError::PdfStructure(format!(
                "expected a dictionary, found {}",
                object_kind(other)
            ))),
        }
    }

    fn page_dict(&self) -> Result<&Dictionary> {
        self.document
            .get_object(self.page_id)
            .and_then(Object::as_dict)
            .map_err(|err| CertScrubError::PdfStructure(format!("page object unreadable: {err}")))
    }

    fn page_dict_mut(&mut self) -> Result<&mut Dictionary> {
        self.document
            .get_object_mut(self.page_id)
            .and_then(Object::as_dict_mut)
            .map_err(|err| CertScrubError::PdfStructure(format!("page object unreadable: {err}")))
    }
}

fn fill_color(color: RgbColor) -> Operation {
    Operation::new("rg", vec![color.r.into(), color.g.into(), color.b.into()])
}

fn object_kind(object: &Object) -> &'static str {
    match object {
        Object::Null => "null",
        Object::Boolean(_) => "boolean",
        Object::Integer(_) => "integer",
        Object::Real(_) => "real",
        Object::Name(_) => "name",
        Object::String(..) => "string",
        Object::Array(_) => "array",
        Object::Dictionary(_) => "dictionary",
        Object::Stream(_) => "stream",
        Object::Reference(_) => "reference",
    }
}

/// Remove object and cross-reference streams carried over from the input and
/// switch the writer to a plain xref table.
fn drop_compressed_xref(document: &mut Document) {
    document.reference_table.cross_reference_type = XrefType::CrossReferenceTable;
    let before = document.objects.len();
    document
        .objects
        .retain(|_, object| !matches!(object.type_name(), Ok(b"ObjStm") | Ok(b"XRef")));
    for key in XREF_STREAM_KEYS {
        document.trailer.remove(key);
    }
    let dropped = before - document.objects.len();
    if dropped > 0 {
        debug!(dropped, "Dropped compressed cross-reference objects");
    }
}
