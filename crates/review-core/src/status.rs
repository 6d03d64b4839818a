//! Page status derivation
//!
//! Pure functions over an issue snapshot. Nothing here caches; callers
//! recompute after every store change.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Issue, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageStatus {
    /// No findings were ever recorded for the page
    Clean,
    /// At least one active error
    Error,
    /// Active warnings but no active errors
    Warning,
    /// Findings exist but all have been acknowledged
    Resolved,
}

impl PageStatus {
    /// Page still has findings needing attention.
    pub fn is_problem(&self) -> bool {
        matches!(self, PageStatus::Error | PageStatus::Warning)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PageStatus::Clean => "clean",
            PageStatus::Error => "error",
            PageStatus::Warning => "warning",
            PageStatus::Resolved => "resolved",
        }
    }
}

/// Classify a page. Active errors take precedence over active warnings.
pub fn status_of(page: u32, issues: &[Issue]) -> PageStatus {
    let mut on_page = issues.iter().filter(|issue| issue.page == page).peekable();
    if on_page.peek().is_none() {
        return PageStatus::Clean;
    }

    let mut has_warning = false;
    for issue in on_page.filter(|issue| issue.is_active()) {
        match issue.severity {
            Severity::Error => return PageStatus::Error,
            Severity::Warning => has_warning = true,
        }
    }

    if has_warning {
        PageStatus::Warning
    } else {
        PageStatus::Resolved
    }
}

/// One cell of the document map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEntry {
    pub page: u32,
    pub status: PageStatus,
}

/// Status of every page that has at least one finding, keyed by page.
///
/// Built in one pass over the issues; pages without findings are absent
/// and read as [`PageStatus::Clean`].
pub fn page_statuses(issues: &[Issue]) -> BTreeMap<u32, PageStatus> {
    let mut statuses = BTreeMap::new();
    for issue in issues {
        let status = statuses.entry(issue.page).or_insert(PageStatus::Resolved);
        if issue.is_active() {
            *status = match (issue.severity, *status) {
                (Severity::Error, _) | (_, PageStatus::Error) => PageStatus::Error,
                (Severity::Warning, _) => PageStatus::Warning,
            };
        }
    }
    statuses
}

/// Status of every page from 1 to `num_pages`.
pub fn document_map(num_pages: u32, issues: &[Issue]) -> Vec<PageEntry> {
    let statuses = page_statuses(issues);
    (1..=num_pages)
        .map(|page| PageEntry {
            page,
            status: statuses.get(&page).copied().unwrap_or(PageStatus::Clean),
        })
        .collect()
}

/// Map entries for the pages in `1..=num_pages` that have findings.
pub fn referenced_pages(num_pages: u32, issues: &[Issue]) -> Vec<PageEntry> {
    if num_pages == 0 {
        return Vec::new();
    }
    page_statuses(issues)
        .range(1..=num_pages)
        .map(|(&page, &status)| PageEntry { page, status })
        .collect()
}

/// Aggregate counts for a review in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub error_pages: u32,
    pub warning_pages: u32,
    pub resolved_pages: u32,
    pub clean_pages: u32,
    pub active_issues: usize,
    pub ignored_issues: usize,
}

impl ReviewSummary {
    /// Counts pages in `1..=num_pages`. Cost follows the number of findings,
    /// not the page count.
    pub fn compute(num_pages: u32, issues: &[Issue]) -> Self {
        let mut summary = Self::default();
        let mut referenced = 0;
        for entry in referenced_pages(num_pages, issues) {
            referenced += 1;
            match entry.status {
                PageStatus::Clean => {}
                PageStatus::Error => summary.error_pages += 1,
                PageStatus::Warning => summary.warning_pages += 1,
                PageStatus::Resolved => summary.resolved_pages += 1,
            }
        }
        summary.clean_pages = num_pages - referenced;
        summary.active_issues = issues.iter().filter(|i| i.is_active()).count();
        summary.ignored_issues = issues.len() - summary.active_issues;
        summary
    }

    /// No page left with an active finding.
    pub fn is_all_clear(&self) -> bool {
        self.error_pages == 0 && self.warning_pages == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::IssueStore;
    use crate::types::IssueId;
    use pretty_assertions::assert_eq;

    fn issue(id: u32, page: u32, severity: Severity) -> Issue {
        Issue {
            id: IssueId(id),
            page,
            code: "RULE".to_string(),
            severity,
            message: String::new(),
            bbox: None,
            is_ignored: false,
        }
    }

    #[test]
    fn test_page_without_issues_is_clean() {
        let issues = vec![issue(1, 2, Severity::Error)];
        assert_eq!(status_of(1, &issues), PageStatus::Clean);
        assert_eq!(status_of(1, &[]), PageStatus::Clean);
    }

    #[test]
    fn test_error_takes_precedence_over_warning() {
        let mut store = IssueStore::from_issues(vec![
            issue(1, 1, Severity::Warning),
            issue(2, 1, Severity::Error),
        ]);
        assert_eq!(status_of(1, store.all_issues()), PageStatus::Error);

        store.toggle(IssueId(2));
        assert_eq!(status_of(1, store.all_issues()), PageStatus::Warning);
    }

    #[test]
    fn test_all_ignored_is_resolved() {
        let mut store = IssueStore::from_issues(vec![
            issue(1, 4, Severity::Error),
            issue(2, 4, Severity::Warning),
        ]);
        store.toggle(IssueId(1));
        store.toggle(IssueId(2));
        assert_eq!(status_of(4, store.all_issues()), PageStatus::Resolved);
    }

    #[test]
    fn test_document_map_covers_every_page() {
        let issues = vec![issue(1, 2, Severity::Warning), issue(2, 3, Severity::Error)];
        let statuses: Vec<PageStatus> = document_map(4, &issues)
            .iter()
            .map(|e| e.status)
            .collect();
        assert_eq!(
            statuses,
            vec![
                PageStatus::Clean,
                PageStatus::Warning,
                PageStatus::Error,
                PageStatus::Clean
            ]
        );
    }

    #[test]
    fn test_summary_counts() {
        let mut issues = vec![
            issue(1, 1, Severity::Error),
            issue(2, 2, Severity::Warning),
            issue(3, 3, Severity::Warning),
        ];
        issues[2].is_ignored = true;

        let summary = ReviewSummary::compute(4, &issues);
        assert_eq!(
            summary,
            ReviewSummary {
                error_pages: 1,
                warning_pages: 1,
                resolved_pages: 1,
                clean_pages: 1,
                active_issues: 2,
                ignored_issues: 1,
            }
        );
        assert!(!summary.is_all_clear());
    }

    #[test]
    fn test_page_statuses_agree_with_status_of() {
        let mut issues = vec![
            issue(1, 1, Severity::Warning),
            issue(2, 1, Severity::Error),
            issue(3, 2, Severity::Error),
            issue(4, 2, Severity::Warning),
            issue(5, 3, Severity::Warning),
        ];
        issues[2].is_ignored = true;
        issues[4].is_ignored = true;

        let statuses = page_statuses(&issues);
        for page in 1..=4 {
            let expected = status_of(page, &issues);
            let actual = statuses.get(&page).copied().unwrap_or(PageStatus::Clean);
            assert_eq!(actual, expected, "page {}", page);
        }
    }

    #[test]
    fn test_summary_with_huge_page_count_stays_sparse() {
        let issues = vec![
            issue(1, 3, Severity::Error),
            issue(2, u32::MAX, Severity::Warning),
        ];
        let summary = ReviewSummary::compute(u32::MAX, &issues);
        assert_eq!(summary.error_pages, 1);
        assert_eq!(summary.warning_pages, 1);
        assert_eq!(summary.clean_pages, u32::MAX - 2);
    }

    #[test]
    fn test_summary_ignores_pages_past_the_document() {
        let issues = vec![issue(1, 2, Severity::Error), issue(2, 9, Severity::Error)];
        let summary = ReviewSummary::compute(4, &issues);
        assert_eq!(summary.error_pages, 1);
        assert_eq!(summary.clean_pages, 3);
        assert_eq!(ReviewSummary::compute(0, &issues).clean_pages, 0);
    }

    #[test]
    fn test_referenced_pages_lists_only_pages_with_findings() {
        let issues = vec![issue(1, 7, Severity::Warning), issue(2, 2, Severity::Error)];
        assert_eq!(
            referenced_pages(10, &issues),
            vec![
                PageEntry {
                    page: 2,
                    status: PageStatus::Error
                },
                PageEntry {
                    page: 7,
                    status: PageStatus::Warning
                },
            ]
        );
        assert!(referenced_pages(0, &issues).is_empty());
    }
}
