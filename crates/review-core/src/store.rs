//! In-memory issue store for a review session
//!
//! The store is filled once from a parsed report. Afterwards issues are never
//! added or removed; only their `is_ignored` flag changes, and only through
//! the methods here.

use serde::{Deserialize, Serialize};

use crate::types::{Issue, IssueId};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueStore {
    issues: Vec<Issue>,
}

impl IssueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from parsed issues, keeping their order.
    pub fn from_issues(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    /// Flip the ignored flag of one issue.
    ///
    /// Returns `false` without touching anything when the id is unknown.
    pub fn toggle(&mut self, id: IssueId) -> bool {
        match self.issues.iter_mut().find(|issue| issue.id == id) {
            Some(issue) => {
                issue.is_ignored = !issue.is_ignored;
                tracing::debug!(%id, ignored = issue.is_ignored, "Toggled issue");
                true
            }
            None => {
                tracing::debug!(%id, "Toggle on unknown issue ignored");
                false
            }
        }
    }

    /// Set the ignored flag on every issue of a page.
    pub fn set_page_ignored(&mut self, page: u32, value: bool) {
        for issue in self.issues.iter_mut().filter(|issue| issue.page == page) {
            issue.is_ignored = value;
        }
    }

    /// Resolve every issue on the page, or reopen them all when the page is
    /// already fully resolved. Returns the new ignored value, or `None` when
    /// the page has no issues.
    pub fn toggle_page(&mut self, page: u32) -> Option<bool> {
        if !self.issues.iter().any(|issue| issue.page == page) {
            return None;
        }
        let value = self.has_active_on_page(page);
        self.set_page_ignored(page, value);
        Some(value)
    }

    pub fn issues_for_page(&self, page: u32) -> Vec<&Issue> {
        self.issues
            .iter()
            .filter(|issue| issue.page == page)
            .collect()
    }

    pub fn all_issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn active_issues(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|issue| issue.is_active())
    }

    pub fn get(&self, id: IssueId) -> Option<&Issue> {
        self.issues.iter().find(|issue| issue.id == id)
    }

    pub fn has_active_on_page(&self, page: u32) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.page == page && issue.is_active())
    }

    /// True when the page has issues and every one of them is ignored.
    pub fn all_ignored_on_page(&self, page: u32) -> bool {
        let mut on_page = self
            .issues
            .iter()
            .filter(|issue| issue.page == page)
            .peekable();
        on_page.peek().is_some() && on_page.all(|issue| issue.is_ignored)
    }

    /// Highest page any issue refers to, 0 when empty.
    pub fn max_page(&self) -> u32 {
        self.issues.iter().map(|issue| issue.page).max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}
