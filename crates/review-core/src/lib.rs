//! Review engine for PDF validation findings
//!
//! Parses a findings report, tracks which findings a reviewer has
//! acknowledged, and derives what the viewer shows:
//!
//! - per-page status for the document map
//! - highlight rectangles as page-relative percentages
//! - the next page that still needs attention
//! - a cleaned report containing only unresolved findings
//!
//! Rendering the document itself is left to the caller, which reports page
//! count and page sizes back as [`PageEvent`]s.

pub mod document;
pub mod error;
pub mod export;
pub mod navigation;
pub mod overlay;
pub mod report;
pub mod session;
pub mod status;
pub mod store;
pub mod types;

pub use document::{PageEvent, PageMetrics, PageSize, PdfDocumentInfo};
pub use error::ReviewError;
pub use export::{export, ExportSummary};
pub use navigation::{approve_and_advance, next_problem_page, NavigationOutcome};
pub use overlay::{to_overlay_rect, Overlay, OverlayRect, OverlayStyle};
pub use report::{parse, parse_report, ParsedReport};
pub use session::{PageView, ReviewSession};
pub use status::{
    page_statuses, referenced_pages, status_of, PageEntry, PageStatus, ReviewSummary,
};
pub use store::IssueStore;
pub use types::{BBox, Issue, IssueId, Severity};

/// Read page count and page sizes from PDF bytes
pub fn get_document_info(bytes: &[u8]) -> Result<PdfDocumentInfo, ReviewError> {
    PdfDocumentInfo::from_bytes(bytes)
}
