//! Findings report parsing
//!
//! The report is comma-separated text with a header row:
//!
//! ```text
//! Page,Code,Severity,Message,BBox
//! 3,FONT_SIZE,error,"Body text below 12pt","[72,100,540,120]"
//! ```
//!
//! Parsing never fails as a whole. Rows that cannot be turned into an
//! [`Issue`] are dropped and counted, and unusable bbox values degrade to
//! "no region" while keeping the row.
//!
//! The format has no escape for a literal `"` inside a quoted field, so a
//! message containing one shifts the quote tracking for the rest of the row.

use crate::types::{BBox, Issue, IssueId, Severity};

/// Header row written by the exporter and expected (but not checked) on input.
pub const REPORT_HEADER: &str = "Page,Code,Severity,Message,BBox";

const FIELD_COUNT: usize = 5;

/// Parse outcome with the number of rows that were dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedReport {
    pub issues: Vec<Issue>,
    pub skipped: usize,
}

/// Parse report text into issues, in row order.
pub fn parse(text: &str) -> Vec<Issue> {
    parse_report(text).issues
}

/// Parse report text, also reporting how many data rows were skipped.
pub fn parse_report(text: &str) -> ParsedReport {
    let mut report = ParsedReport::default();

    // Row ids are the line index with the header at 0, so the first data
    // row is id 1 and skipped rows still consume theirs.
    for (index, line) in text.trim().lines().enumerate().skip(1) {
        match parse_row(index as u32, line) {
            Some(issue) => report.issues.push(issue),
            None => {
                tracing::debug!(row = index, line, "Skipping malformed report row");
                report.skipped += 1;
            }
        }
    }

    tracing::debug!(
        issues = report.issues.len(),
        skipped = report.skipped,
        "Parsed findings report"
    );
    report
}

fn parse_row(id: u32, line: &str) -> Option<Issue> {
    let fields = split_fields(line);
    if fields.len() < FIELD_COUNT {
        return None;
    }

    let page: u32 = fields[0].trim().parse().ok().filter(|p| *p >= 1)?;
    let code = fields[1].trim().to_string();
    let severity = Severity::from_label(&fields[2].trim().to_lowercase())?;
    let message = strip_quotes(fields[3].trim()).to_string();
    let bbox = parse_bbox(strip_quotes(fields[4].trim()));

    Some(Issue {
        id: IssueId(id),
        page,
        code,
        severity,
        message,
        bbox,
        is_ignored: false,
    })
}

/// Split a row on commas that are not inside double quotes.
///
/// Quote characters are kept in the field text; the caller strips them.
pub fn split_fields(line: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (pos, ch) in line.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(&line[start..pos]);
                start = pos + 1;
            }
            _ => {}
        }
    }
    fields.push(&line[start..]);

    fields
}

/// Strip one leading and one trailing `"` if present.
fn strip_quotes(field: &str) -> &str {
    let field = field.strip_prefix('"').unwrap_or(field);
    field.strip_suffix('"').unwrap_or(field)
}

/// Parse a JSON-style `[x0,y0,x1,y1]` array.
///
/// Anything other than exactly four numbers, or four zeros, yields `None`.
pub fn parse_bbox(text: &str) -> Option<BBox> {
    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    let items = value.as_array()?;
    if items.len() != 4 {
        return None;
    }

    let mut components = [0.0f64; 4];
    for (slot, item) in components.iter_mut().zip(items) {
        *slot = item.as_f64()?;
    }
    BBox::from_components(components)
}
