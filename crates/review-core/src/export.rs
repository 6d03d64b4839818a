//! Re-serialization of the findings that still need attention
//!
//! Output uses the same five-column layout the parser reads. Acknowledged
//! findings are dropped. Quotes inside messages are written as-is; the
//! format has no escape for them.

use std::fmt::Write;

use crate::report::REPORT_HEADER;
use crate::types::{BBox, Issue};

/// Counts reported after an export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub exported: usize,
    pub discarded: usize,
}

/// Serialize every active issue, in store order.
pub fn export(issues: &[Issue]) -> String {
    export_with_summary(issues).0
}

pub fn export_with_summary(issues: &[Issue]) -> (String, ExportSummary) {
    let rows: Vec<String> = issues
        .iter()
        .filter(|issue| issue.is_active())
        .map(format_row)
        .collect();

    let summary = ExportSummary {
        exported: rows.len(),
        discarded: issues.len() - rows.len(),
    };

    let mut text = String::from(REPORT_HEADER);
    text.push('\n');
    text.push_str(&rows.join("\n"));

    (text, summary)
}

fn format_row(issue: &Issue) -> String {
    let bbox = issue.bbox.as_ref().map(format_bbox).unwrap_or_default();
    format!(
        "{},{},{},\"{}\",\"{}\"",
        issue.page, issue.code, issue.severity, issue.message, bbox
    )
}

/// Render a box as a compact JSON array, e.g. `[72,100,540.5,120]`.
pub fn format_bbox(bbox: &BBox) -> String {
    let mut out = String::from("[");
    for (i, value) in bbox.components().iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_number(&mut out, *value);
    }
    out.push(']');
    out
}

// Integral values print without a fractional part, matching how the
// numbers appear in reports produced by JSON serializers.
fn write_number(out: &mut String, value: f64) {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        let _ = write!(out, "{}", value as i64);
    } else {
        let _ = write!(out, "{}", value);
    }
}
