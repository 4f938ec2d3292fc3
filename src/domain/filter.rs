//! Client-side filter engine for aggregated builder rosters.
//!
//! Pure and deterministic: no I/O, no clock, no randomness. Active filters
//! are applied as an AND conjunction; the result is always score-sorted
//! descending with input order preserved on ties (stable sort).

use std::cmp::Ordering;

use crate::domain::builder::Builder;
use crate::domain::search::{split_terms, SearchParams};

/// Apply search filters to an aggregated builder roster.
///
/// With no active filter the input is returned score-sorted only. With
/// filters, each present predicate narrows the set independently, in the
/// order location → min score → skills → activity.
pub fn apply(mut builders: Vec<Builder>, params: &SearchParams) -> Vec<Builder> {
    if params.is_unfiltered() {
        sort_by_score(&mut builders);
        return builders;
    }

    if let Some(location) = params.location() {
        let needle = location.to_lowercase();
        builders.retain(|b| matches_location(b, &needle));
    }

    if let Some(min_score) = params.min_score() {
        builders.retain(|b| b.score >= min_score);
    }

    if let Some(skills) = params.skills() {
        let terms = split_terms(skills);
        builders.retain(|b| matches_skills(b, &terms));
    }

    if let Some(activity) = params.activity() {
        let terms = split_terms(activity);
        builders.retain(|b| matches_activity(b, &terms));
    }

    sort_by_score(&mut builders);
    builders
}

/// Location predicate: case-insensitive substring against location, bio,
/// or display name. Any one hit is sufficient.
fn matches_location(builder: &Builder, needle: &str) -> bool {
    builder.location.to_lowercase().contains(needle)
        || builder.bio.to_lowercase().contains(needle)
        || builder.display_name.to_lowercase().contains(needle)
}

/// Skills predicate: any term is a substring of any tag, any skill, or the
/// bio.
fn matches_skills(builder: &Builder, terms: &[String]) -> bool {
    let bio = builder.bio.to_lowercase();
    terms.iter().any(|term| {
        builder.tags.iter().any(|t| t.to_lowercase().contains(term))
            || builder.skills.iter().any(|s| s.to_lowercase().contains(term))
            || bio.contains(term)
    })
}

/// Activity predicate: any term is a substring of any tag or the bio.
/// The skills list is deliberately not consulted here.
fn matches_activity(builder: &Builder, terms: &[String]) -> bool {
    let bio = builder.bio.to_lowercase();
    terms.iter().any(|term| {
        builder.tags.iter().any(|t| t.to_lowercase().contains(term)) || bio.contains(term)
    })
}

fn sort_by_score(builders: &mut [Builder]) {
    // Stable: equal scores keep their first-seen aggregation order.
    builders.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}
