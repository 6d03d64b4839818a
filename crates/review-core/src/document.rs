//! Document page metadata
//!
//! The renderer owns the document; the review engine only needs the page
//! count and each page's original size in the same units as finding boxes.
//! [`PdfDocumentInfo`] reads both straight from a PDF with lopdf, and
//! [`PageMetrics`] collects them as renderer notifications arrive.

use std::collections::{BTreeMap, HashMap};

use lopdf::{Dictionary, Document, Object, ObjectId};
use serde::{Deserialize, Serialize};

use crate::error::ReviewError;

/// US Letter at 72 DPI, used when a page tree carries no MediaBox at all.
pub const DEFAULT_PAGE_SIZE: PageSize = PageSize {
    width: 612.0,
    height: 792.0,
};

const MAX_TREE_DEPTH: usize = 32;

/// Original page size in document units (points for PDF).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Page count and page sizes of a loaded PDF.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfDocumentInfo {
    sizes: BTreeMap<u32, PageSize>,
}

impl PdfDocumentInfo {
    /// Parse PDF bytes and read every page's MediaBox.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ReviewError> {
        let doc =
            Document::load_mem(bytes).map_err(|e| ReviewError::DocumentParse(e.to_string()))?;

        let mut sizes = BTreeMap::new();
        for (page_num, page_id) in doc.get_pages() {
            let size = page_size(&doc, page_id)?;
            sizes.insert(page_num, size);
        }

        tracing::debug!(pages = sizes.len(), "Loaded PDF page metadata");
        Ok(Self { sizes })
    }

    pub fn page_count(&self) -> u32 {
        self.sizes.len() as u32
    }

    pub fn page_size(&self, page: u32) -> Option<PageSize> {
        self.sizes.get(&page).copied()
    }

    /// Replay the metadata as renderer notifications.
    pub fn events(&self) -> Vec<PageEvent> {
        let mut events = vec![PageEvent::DocumentLoaded {
            num_pages: self.page_count(),
        }];
        events.extend(self.sizes.iter().map(|(&page, size)| PageEvent::PageRendered {
            page,
            width: size.width,
            height: size.height,
        }));
        events
    }
}

/// Resolve the MediaBox for a page, walking up the page tree for inherited
/// values.
fn page_size(doc: &Document, page_id: ObjectId) -> Result<PageSize, ReviewError> {
    let mut dict = doc
        .get_dictionary(page_id)
        .map_err(|e| ReviewError::DocumentParse(format!("Failed to get page object: {}", e)))?;

    // Bounded so a malformed Parent cycle cannot spin forever
    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(media_box) = dict.get(b"MediaBox") {
            return parse_rect(doc, media_box);
        }
        match parent_of(doc, dict) {
            Some(parent) => dict = parent,
            None => break,
        }
    }
    Ok(DEFAULT_PAGE_SIZE)
}

fn parent_of<'a>(doc: &'a Document, dict: &Dictionary) -> Option<&'a Dictionary> {
    let parent_id = dict.get(b"Parent").ok()?.as_reference().ok()?;
    doc.get_dictionary(parent_id).ok()
}

/// Turn a `[x0 y0 x1 y1]` rectangle into its width and height.
fn parse_rect(doc: &Document, obj: &Object) -> Result<PageSize, ReviewError> {
    let arr = match obj {
        Object::Array(a) => a,
        Object::Reference(id) => doc.get_object(*id).and_then(Object::as_array).map_err(|_| {
            ReviewError::InvalidGeometry("MediaBox reference is not an array".into())
        })?,
        _ => {
            return Err(ReviewError::InvalidGeometry(
                "MediaBox is not an array".into(),
            ))
        }
    };

    if arr.len() != 4 {
        return Err(ReviewError::InvalidGeometry(format!(
            "MediaBox has {} elements, expected 4",
            arr.len()
        )));
    }

    let mut values = [0.0f64; 4];
    for (slot, obj) in values.iter_mut().zip(arr) {
        *slot = extract_number(doc, obj)?;
    }

    Ok(PageSize {
        width: (values[2] - values[0]).abs(),
        height: (values[3] - values[1]).abs(),
    })
}

fn extract_number(doc: &Document, obj: &Object) -> Result<f64, ReviewError> {
    match obj {
        Object::Integer(i) => Ok(*i as f64),
        Object::Real(r) => Ok(*r as f64),
        Object::Reference(id) => {
            let resolved = doc
                .get_object(*id)
                .map_err(|e| ReviewError::InvalidGeometry(format!("Failed to resolve: {}", e)))?;
            extract_number(doc, resolved)
        }
        _ => Err(ReviewError::InvalidGeometry(
            "Expected number in rectangle".into(),
        )),
    }
}

/// Notification from the document renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PageEvent {
    /// The document opened and its page count is known
    DocumentLoaded { num_pages: u32 },
    /// A page was rendered once and reported its original size
    PageRendered { page: u32, width: f64, height: f64 },
}

/// Document facts as they have been reported so far.
///
/// Nothing is assumed before the matching event arrives: the page count is
/// `None` until the document loads and a page has no size until rendered.
#[derive(Debug, Clone, Default)]
pub struct PageMetrics {
    num_pages: Option<u32>,
    sizes: HashMap<u32, PageSize>,
}

impl PageMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: PageEvent) {
        match event {
            PageEvent::DocumentLoaded { num_pages } => {
                tracing::debug!(num_pages, "Document loaded");
                self.num_pages = Some(num_pages);
            }
            PageEvent::PageRendered {
                page,
                width,
                height,
            } => {
                self.sizes.insert(page, PageSize::new(width, height));
            }
        }
    }

    pub fn num_pages(&self) -> Option<u32> {
        self.num_pages
    }

    pub fn dimensions(&self, page: u32) -> Option<PageSize> {
        self.sizes.get(&page).copied()
    }
}
