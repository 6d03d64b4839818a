//! Overlay geometry for finding highlights
//!
//! Converts issue rectangles from document coordinates into percentages of
//! the rendered page, so the presentation layer can position highlight boxes
//! independent of the zoom level it renders at.

use serde::{Deserialize, Serialize};

use crate::document::PageSize;
use crate::types::{BBox, Issue, IssueId, Severity};

/// Rectangle as percentages (0-100) of the page extent, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Map a document-space box onto the page as percentages.
///
/// Returns `None` without a box or without usable page dimensions. Boxes
/// outside the page are not clamped and map to rectangles outside 0-100.
pub fn to_overlay_rect(
    bbox: Option<&BBox>,
    page_width: f64,
    page_height: f64,
) -> Option<OverlayRect> {
    let bbox = bbox?;
    if !is_usable_extent(page_width) || !is_usable_extent(page_height) {
        return None;
    }

    Some(OverlayRect {
        left: bbox.x0 / page_width * 100.0,
        top: bbox.y0 / page_height * 100.0,
        width: (bbox.x1 - bbox.x0) / page_width * 100.0,
        height: (bbox.y1 - bbox.y0) / page_height * 100.0,
    })
}

fn is_usable_extent(value: f64) -> bool {
    value.is_finite() && value != 0.0
}

/// Visual treatment of a highlight box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayStyle {
    Error,
    Warning,
    Resolved,
}

impl OverlayStyle {
    /// Acknowledged issues use the resolved treatment regardless of severity.
    pub fn for_issue(issue: &Issue) -> Self {
        if issue.is_ignored {
            return OverlayStyle::Resolved;
        }
        match issue.severity {
            Severity::Error => OverlayStyle::Error,
            Severity::Warning => OverlayStyle::Warning,
        }
    }
}

/// Hover text for an active finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub code: String,
    pub message: String,
}

/// A highlight box ready to hand to the renderer. Clicking it should toggle
/// `issue_id` in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    pub issue_id: IssueId,
    pub rect: OverlayRect,
    pub style: OverlayStyle,
    pub tooltip: Option<Tooltip>,
}

impl Overlay {
    pub fn for_issue(issue: &Issue, size: PageSize) -> Option<Self> {
        let rect = to_overlay_rect(issue.bbox.as_ref(), size.width, size.height)?;
        let tooltip = issue.is_active().then(|| Tooltip {
            code: issue.code.clone(),
            message: issue.message.clone(),
        });

        Some(Self {
            issue_id: issue.id,
            rect,
            style: OverlayStyle::for_issue(issue),
            tooltip,
        })
    }
}

/// Overlays for every issue on `page` that has geometry, in store order.
///
/// Empty until the page dimensions are known.
pub fn overlays_for_page(page: u32, issues: &[Issue], size: Option<PageSize>) -> Vec<Overlay> {
    let Some(size) = size else {
        return Vec::new();
    };
    issues
        .iter()
        .filter(|issue| issue.page == page)
        .filter_map(|issue| Overlay::for_issue(issue, size))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(x0: f64, y0: f64, x1: f64, y1: f64) -> BBox {
        BBox { x0, y0, x1, y1 }
    }

    fn issue(id: u32, page: u32, bbox: Option<BBox>) -> Issue {
        Issue {
            id: IssueId(id),
            page,
            code: "SPACING".to_string(),
            severity: Severity::Error,
            message: "Line spacing".to_string(),
            bbox,
            is_ignored: false,
        }
    }

    #[test]
    fn test_scaling_to_percentages() {
        let rect = to_overlay_rect(Some(&bbox(100.0, 200.0, 300.0, 400.0)), 600.0, 800.0).unwrap();
        assert!((rect.left - 16.6667).abs() < 0.001);
        assert!((rect.top - 25.0).abs() < 0.001);
        assert!((rect.width - 33.3333).abs() < 0.001);
        assert!((rect.height - 25.0).abs() < 0.001);
    }

    #[test]
    fn test_missing_inputs_yield_none() {
        let b = bbox(1.0, 2.0, 3.0, 4.0);
        assert!(to_overlay_rect(None, 600.0, 800.0).is_none());
        assert!(to_overlay_rect(Some(&b), 0.0, 800.0).is_none());
        assert!(to_overlay_rect(Some(&b), 600.0, 0.0).is_none());
        assert!(to_overlay_rect(Some(&b), f64::NAN, 800.0).is_none());
    }

    #[test]
    fn test_out_of_page_box_is_not_clamped() {
        let rect = to_overlay_rect(Some(&bbox(-60.0, 700.0, 660.0, 900.0)), 600.0, 800.0).unwrap();
        assert!((rect.left + 10.0).abs() < 0.001);
        assert!(rect.left + rect.width > 100.0);
        assert!(rect.top + rect.height > 100.0);
    }

    #[test]
    fn test_style_follows_severity_and_resolution() {
        let mut i = issue(1, 1, None);
        assert_eq!(OverlayStyle::for_issue(&i), OverlayStyle::Error);
        i.severity = Severity::Warning;
        assert_eq!(OverlayStyle::for_issue(&i), OverlayStyle::Warning);
        i.is_ignored = true;
        assert_eq!(OverlayStyle::for_issue(&i), OverlayStyle::Resolved);
    }

    #[test]
    fn test_tooltip_only_for_active_issues() {
        let size = PageSize::new(612.0, 792.0);
        let mut i = issue(1, 1, Some(bbox(10.0, 10.0, 20.0, 20.0)));

        let overlay = Overlay::for_issue(&i, size).unwrap();
        assert_eq!(overlay.tooltip.unwrap().code, "SPACING");

        i.is_ignored = true;
        let overlay = Overlay::for_issue(&i, size).unwrap();
        assert!(overlay.tooltip.is_none());
    }

    #[test]
    fn test_overlays_for_page_skips_issues_without_geometry() {
        let issues = vec![
            issue(1, 1, Some(bbox(10.0, 10.0, 20.0, 20.0))),
            issue(2, 1, None),
            issue(3, 2, Some(bbox(10.0, 10.0, 20.0, 20.0))),
        ];
        let size = Some(PageSize::new(100.0, 100.0));

        let overlays = overlays_for_page(1, &issues, size);
        assert_eq!(overlays.len(), 1);
        assert_eq!(overlays[0].issue_id, IssueId(1));

        assert!(overlays_for_page(1, &issues, None).is_empty());
    }
}
