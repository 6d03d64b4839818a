//! Page navigation policy

use crate::status::page_statuses;
use crate::store::IssueStore;
use crate::types::Issue;

/// Result of jumping to the next page that still needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    Moved(u32),
    /// No later page has an active finding. Callers must tell the reviewer
    /// rather than silently staying put.
    AllClear,
}

/// First page strictly after `current_page` (up to `max_page`) whose status
/// is error or warning. Only pages with findings are visited.
pub fn next_problem_page(current_page: u32, max_page: u32, issues: &[Issue]) -> Option<u32> {
    let start = current_page.checked_add(1)?;
    if start > max_page {
        return None;
    }
    page_statuses(issues)
        .range(start..=max_page)
        .find(|(_, status)| status.is_problem())
        .map(|(&page, _)| page)
}

/// Acknowledge every finding on the current page, then move forward one page
/// unless already on the last.
pub fn approve_and_advance(current_page: u32, max_page: u32, store: &mut IssueStore) -> u32 {
    if store.has_active_on_page(current_page) {
        store.set_page_ignored(current_page, true);
        tracing::debug!(page = current_page, "Approved page");
    }
    if current_page < max_page {
        current_page + 1
    } else {
        current_page
    }
}

/// One page back, never below 1.
pub fn previous_page(current_page: u32) -> u32 {
    current_page.saturating_sub(1).max(1)
}

/// One page forward, never past `max_page`. An unknown page count (0) is
/// treated as a single page.
pub fn next_page(current_page: u32, max_page: u32) -> u32 {
    current_page.saturating_add(1).min(max_page.max(1))
}

/// Clamp an arbitrary page request into `1..=max_page`.
pub fn clamp_page(page: u32, max_page: u32) -> u32 {
    page.clamp(1, max_page.max(1))
}
