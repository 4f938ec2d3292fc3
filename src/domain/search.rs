//! Search parameters and term-splitting helpers.
//!
//! The upstream API accepts a single keyword, while users supply up to four
//! independent filters. The heuristics that bridge the two (first comma
//! segment, trimmed lower-cased term lists) live here as small pure
//! functions so they stay independently testable.

use serde::{Deserialize, Serialize};

/// Client-side search filters.
///
/// Every field is optional; a blank-after-trim string is equivalent to an
/// absent field. `skills` and `activity` hold comma-joined term lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    /// Minimum overall score (inclusive).
    pub min_score: Option<f64>,
    /// Comma-joined skill terms.
    pub skills: Option<String>,
    /// Location substring.
    pub location: Option<String>,
    /// Comma-joined activity terms.
    pub activity: Option<String>,
}

impl SearchParams {
    /// Location filter, if present after trimming.
    pub fn location(&self) -> Option<&str> {
        present(self.location.as_deref())
    }

    /// Skills term string, if present after trimming.
    pub fn skills(&self) -> Option<&str> {
        present(self.skills.as_deref())
    }

    /// Activity term string, if present after trimming.
    pub fn activity(&self) -> Option<&str> {
        present(self.activity.as_deref())
    }

    /// Minimum score filter. Zero means "no constraint".
    pub fn min_score(&self) -> Option<f64> {
        self.min_score.filter(|v| *v > 0.0)
    }

    /// True when no filter is active and results are returned as-is
    /// (score-sorted only).
    pub fn is_unfiltered(&self) -> bool {
        self.location().is_none()
            && self.min_score().is_none()
            && self.skills().is_none()
            && self.activity().is_none()
    }

    /// Single keyword forwarded to the upstream search endpoint.
    ///
    /// Location wins over skills; only the first comma segment of the
    /// skills list is usable server-side. Remaining filters are applied
    /// client-side.
    pub fn upstream_keyword(&self) -> Option<String> {
        if let Some(loc) = self.location() {
            return Some(loc.to_string());
        }
        self.skills().and_then(first_segment)
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Split a comma-joined term string into trimmed, lower-cased, non-empty
/// terms.
pub fn split_terms(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// First non-empty comma segment of a term string, trimmed.
pub fn first_segment(raw: &str) -> Option<String> {
    raw.split(',')
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}
