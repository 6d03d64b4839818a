//! Core data model for validation findings
//!
//! An [`Issue`] is one finding produced by an upstream validator, tied to a
//! document page and optionally to a rectangle on that page.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of an issue for the lifetime of a review session.
///
/// Assigned by the report parser from the source row position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueId(pub u32);

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    /// Parse an already-lowercased severity label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "error" => Some(Severity::Error),
            "warning" => Some(Severity::Warning),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rectangle in document coordinate space: `(x0, y0)` to `(x1, y1)`.
///
/// Uses the same units as the page dimensions reported for the document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BBox {
    /// Build a box from four components.
    ///
    /// Returns `None` when any component is non-finite or all four are zero;
    /// an all-zero rectangle carries no usable geometry.
    pub fn from_components(values: [f64; 4]) -> Option<Self> {
        if values.iter().any(|v| !v.is_finite()) {
            return None;
        }
        if values.iter().all(|v| *v == 0.0) {
            return None;
        }
        let [x0, y0, x1, y1] = values;
        Some(Self { x0, y0, x1, y1 })
    }

    pub fn components(&self) -> [f64; 4] {
        [self.x0, self.y0, self.x1, self.y1]
    }
}

/// One validation finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: IssueId,
    /// 1-based page number
    pub page: u32,
    /// Identifier of the rule that produced the finding
    pub code: String,
    pub severity: Severity,
    pub message: String,
    pub bbox: Option<BBox>,
    /// Set when the reviewer has acknowledged the finding as resolved
    #[serde(default)]
    pub is_ignored: bool,
}

impl Issue {
    /// An issue still needing attention.
    pub fn is_active(&self) -> bool {
        !self.is_ignored
    }
}
