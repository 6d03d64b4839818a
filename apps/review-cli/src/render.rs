//! Plain-text rendering of session views

use std::fmt::Write;

use review_core::{Issue, OverlayStyle, PageEntry, PageStatus, PageView, ReviewSummary};

const MAP_COLUMNS: usize = 10;

fn status_marker(status: PageStatus) -> char {
    match status {
        PageStatus::Clean => '.',
        PageStatus::Error => 'E',
        PageStatus::Warning => 'W',
        PageStatus::Resolved => 'R',
    }
}

fn style_marker(style: OverlayStyle) -> char {
    match style {
        OverlayStyle::Error => 'E',
        OverlayStyle::Warning => 'W',
        OverlayStyle::Resolved => 'R',
    }
}

fn issue_line(issue: &Issue) -> String {
    let mark = if issue.is_ignored { "[x]" } else { "[ ]" };
    format!(
        "  {} #{:<4} {:<7} {:<16} {}",
        mark, issue.id, issue.severity, issue.code, issue.message
    )
}

pub fn page_view(view: &PageView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Page {} / {}  [{}]",
        view.page,
        view.page_count,
        view.status.label()
    );

    if view.issues.is_empty() {
        out.push_str("  No issues found on this page");
        return out;
    }

    for issue in &view.issues {
        let _ = writeln!(out, "{}", issue_line(issue));
    }

    for overlay in &view.overlays {
        let r = overlay.rect;
        let _ = writeln!(
            out,
            "  box #{:<4} {} left {:.2}% top {:.2}% width {:.2}% height {:.2}%",
            overlay.issue_id,
            style_marker(overlay.style),
            r.left,
            r.top,
            r.width,
            r.height
        );
    }

    let action = if view.all_resolved {
        "r: undo all"
    } else {
        "r: resolve all"
    };
    let _ = write!(out, "  {} issue(s), {}", view.issues.len(), action);
    out
}

/// Grid of page markers, the current page in brackets.
pub fn document_map(entries: &[PageEntry], current_page: u32) -> String {
    let mut out = String::new();
    for row in entries.chunks(MAP_COLUMNS) {
        let cells: Vec<String> = row
            .iter()
            .map(|entry| {
                let marker = status_marker(entry.status);
                if entry.page == current_page {
                    format!("[{:>3}{}]", entry.page, marker)
                } else {
                    format!(" {:>3}{} ", entry.page, marker)
                }
            })
            .collect();
        let _ = writeln!(out, "{}", cells.join(""));
    }
    out.push_str("E error  W warning  R resolved  . clean");
    out
}

pub fn summary(summary: &ReviewSummary) -> String {
    format!(
        "{} error page(s), {} warning page(s), {} resolved, {} clean; {} open / {} resolved finding(s)",
        summary.error_pages,
        summary.warning_pages,
        summary.resolved_pages,
        summary.clean_pages,
        summary.active_issues,
        summary.ignored_issues
    )
}
