//! Review session state
//!
//! Ties the issue store to the page the reviewer is looking at and to the
//! document facts reported by the renderer. The presentation layer calls
//! into this type for every interaction and re-reads the derived views
//! afterwards.

use serde::Serialize;

use crate::document::{PageEvent, PageMetrics, PageSize};
use crate::export::{export_with_summary, ExportSummary};
use crate::navigation::{self, NavigationOutcome};
use crate::overlay::{overlays_for_page, Overlay};
use crate::report::{parse_report, ParsedReport};
use crate::status::{
    document_map, referenced_pages, status_of, PageEntry, PageStatus, ReviewSummary,
};
use crate::store::IssueStore;
use crate::types::{Issue, IssueId};

/// Everything needed to draw the current page and its issue list.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub page: u32,
    pub page_count: u32,
    pub status: PageStatus,
    pub size: Option<PageSize>,
    pub issues: Vec<Issue>,
    pub overlays: Vec<Overlay>,
    /// Every issue on the page is acknowledged; the page action reads
    /// "undo all" instead of "resolve all"
    pub all_resolved: bool,
}

#[derive(Debug, Default)]
pub struct ReviewSession {
    store: IssueStore,
    metrics: PageMetrics,
    current_page: u32,
    report_loaded: bool,
}

impl ReviewSession {
    /// Session with no findings; every page reads as clean.
    pub fn new() -> Self {
        Self {
            current_page: 1,
            ..Self::default()
        }
    }

    pub fn with_report(text: &str) -> Self {
        let mut session = Self::new();
        session.load_report(text);
        session
    }

    /// Populate the store from report text. Only the first load takes
    /// effect; the store is never replaced mid-session.
    pub fn load_report(&mut self, text: &str) -> ParsedReport {
        let parsed = parse_report(text);
        if self.report_loaded {
            tracing::warn!("Report already loaded, ignoring second load");
            return parsed;
        }

        tracing::info!(
            issues = parsed.issues.len(),
            skipped = parsed.skipped,
            "Loaded findings report"
        );
        self.store = IssueStore::from_issues(parsed.issues.clone());
        self.report_loaded = true;
        parsed
    }

    pub fn apply_page_event(&mut self, event: PageEvent) {
        self.metrics.apply(event);
        if let PageEvent::DocumentLoaded { .. } = event {
            self.current_page = navigation::clamp_page(self.current_page, self.page_count());
        }
    }

    /// Page count from the document when known, else the highest page any
    /// finding refers to, and never less than 1.
    pub fn page_count(&self) -> u32 {
        self.metrics
            .num_pages()
            .unwrap_or_else(|| self.store.max_page())
            .max(1)
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn store(&self) -> &IssueStore {
        &self.store
    }

    pub fn go_to(&mut self, page: u32) -> u32 {
        self.current_page = navigation::clamp_page(page, self.page_count());
        self.current_page
    }

    pub fn next_page(&mut self) -> u32 {
        self.current_page = navigation::next_page(self.current_page, self.page_count());
        self.current_page
    }

    pub fn previous_page(&mut self) -> u32 {
        self.current_page = navigation::previous_page(self.current_page);
        self.current_page
    }

    pub fn jump_to_next_problem(&mut self) -> NavigationOutcome {
        match navigation::next_problem_page(
            self.current_page,
            self.page_count(),
            self.store.all_issues(),
        ) {
            Some(page) => {
                self.current_page = page;
                NavigationOutcome::Moved(page)
            }
            None => NavigationOutcome::AllClear,
        }
    }

    pub fn approve_and_advance(&mut self) -> u32 {
        let max_page = self.page_count();
        self.current_page =
            navigation::approve_and_advance(self.current_page, max_page, &mut self.store);
        self.current_page
    }

    pub fn toggle_issue(&mut self, id: IssueId) -> bool {
        self.store.toggle(id)
    }

    /// Resolve all / undo all on the current page.
    pub fn toggle_current_page(&mut self) -> Option<bool> {
        self.store.toggle_page(self.current_page)
    }

    pub fn current_status(&self) -> PageStatus {
        status_of(self.current_page, self.store.all_issues())
    }

    pub fn current_issues(&self) -> Vec<&Issue> {
        self.store.issues_for_page(self.current_page)
    }

    pub fn current_overlays(&self) -> Vec<Overlay> {
        overlays_for_page(
            self.current_page,
            self.store.all_issues(),
            self.metrics.dimensions(self.current_page),
        )
    }

    pub fn page_view(&self) -> PageView {
        PageView {
            page: self.current_page,
            page_count: self.page_count(),
            status: self.current_status(),
            size: self.metrics.dimensions(self.current_page),
            issues: self.current_issues().into_iter().cloned().collect(),
            overlays: self.current_overlays(),
            all_resolved: self.store.all_ignored_on_page(self.current_page),
        }
    }

    pub fn document_map(&self) -> Vec<PageEntry> {
        document_map(self.page_count(), self.store.all_issues())
    }

    /// Document map restricted to pages that have findings.
    pub fn referenced_page_map(&self) -> Vec<PageEntry> {
        referenced_pages(self.page_count(), self.store.all_issues())
    }

    pub fn summary(&self) -> ReviewSummary {
        ReviewSummary::compute(self.page_count(), self.store.all_issues())
    }

    pub fn export(&self) -> (String, ExportSummary) {
        export_with_summary(self.store.all_issues())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const REPORT: &str = r#"Page,Code,Severity,Message,BBox
2,FONT_SIZE,error,"Body text below 12pt","[100,200,300,400]"
2,MARGIN,warning,"Left margin narrow","""#;

    #[test]
    fn test_empty_session_is_usable() {
        let mut session = ReviewSession::new();
        assert_eq!(session.page_count(), 1);
        assert_eq!(session.current_status(), PageStatus::Clean);
        assert_eq!(session.jump_to_next_problem(), NavigationOutcome::AllClear);
        assert_eq!(session.approve_and_advance(), 1);
    }

    #[test]
    fn test_page_count_falls_back_to_report() {
        let mut session = ReviewSession::with_report(REPORT);
        assert_eq!(session.page_count(), 2);

        session.apply_page_event(PageEvent::DocumentLoaded { num_pages: 10 });
        assert_eq!(session.page_count(), 10);
    }

    #[test]
    fn test_second_load_is_ignored() {
        let mut session = ReviewSession::with_report(REPORT);
        session.load_report("Page,Code,Severity,Message,BBox\n");
        assert_eq!(session.store().len(), 2);
    }

    #[test]
    fn test_overlays_wait_for_page_dimensions() {
        let mut session = ReviewSession::with_report(REPORT);
        session.go_to(2);
        assert!(session.current_overlays().is_empty());

        session.apply_page_event(PageEvent::PageRendered {
            page: 2,
            width: 600.0,
            height: 800.0,
        });
        let overlays = session.current_overlays();
        assert_eq!(overlays.len(), 1);
        assert!((overlays[0].rect.top - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_document_load_clamps_current_page() {
        let mut session = ReviewSession::with_report(REPORT);
        session.go_to(2);
        session.apply_page_event(PageEvent::DocumentLoaded { num_pages: 1 });
        assert_eq!(session.current_page(), 1);
    }

    #[test]
    fn test_toggle_current_page_and_view() {
        let mut session = ReviewSession::with_report(REPORT);
        session.go_to(2);

        assert_eq!(session.toggle_current_page(), Some(true));
        let view = session.page_view();
        assert_eq!(view.status, PageStatus::Resolved);
        assert!(view.all_resolved);
        assert_eq!(view.issues.len(), 2);

        assert_eq!(session.toggle_current_page(), Some(false));
        assert_eq!(session.current_status(), PageStatus::Error);
    }

    #[test]
    fn test_report_page_at_u32_max() {
        let mut session = ReviewSession::with_report(
            "Page,Code,Severity,Message,BBox\n3,A,warning,\"m\",\"\"\n4294967295,B,error,\"m\",\"\"",
        );
        assert_eq!(session.page_count(), u32::MAX);
        assert_eq!(session.jump_to_next_problem(), NavigationOutcome::Moved(3));
        assert_eq!(
            session.jump_to_next_problem(),
            NavigationOutcome::Moved(u32::MAX)
        );
        assert_eq!(session.jump_to_next_problem(), NavigationOutcome::AllClear);
        assert_eq!(session.next_page(), u32::MAX);

        assert_eq!(session.referenced_page_map().len(), 2);
        assert_eq!(session.summary().clean_pages, u32::MAX - 2);
    }
}
