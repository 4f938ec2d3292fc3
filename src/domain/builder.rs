//! Builder domain types and passport normalization.
//!
//! A `Builder` is the canonical talent profile the rest of the system works
//! with. It is produced exactly once per upstream passport record by
//! [`normalize`] and never mutated afterwards: every fallback, default, and
//! derived URL is resolved at normalization time.

use serde::{Deserialize, Serialize};

/// Base URL for Farcaster profile links derived from the passport name.
const FARCASTER_BASE: &str = "https://warpcast.com";

/// Base URL for wallet explorer links derived from the main wallet.
const EXPLORER_BASE: &str = "https://celoscan.io/address";

/// Placeholder used when a passport carries no usable name at all.
const UNKNOWN_BUILDER: &str = "Unknown Builder";

/// Sub-scores that make up a passport's overall reputation score.
///
/// Absent upstream values are normalized to zero so downstream code never
/// deals with missing sub-scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// On-chain / community activity component.
    pub activity: f64,
    /// Identity verification component.
    pub identity: f64,
    /// Skills attestation component.
    pub skills: f64,
}

/// Canonical, normalized talent profile.
///
/// Immutable by convention: construct via [`normalize`], then only read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Builder {
    /// Stable string identifier derived from the numeric passport id.
    /// May be empty for degenerate upstream records.
    pub id: String,
    /// Numeric passport id, the de-duplication key.
    pub passport_id: u64,
    /// Preferred display name (display name → name → "Unknown Builder").
    pub display_name: String,
    /// Handle-style name (name → display name → "Unknown Builder").
    pub name: String,
    /// Avatar image URL; empty when the passport has none.
    pub avatar_url: String,
    /// Overall reputation score, zero when absent upstream.
    pub score: f64,
    /// Per-component score breakdown.
    pub score_breakdown: ScoreBreakdown,
    /// Skill labels. Upstream serves a single tag list, so this usually
    /// mirrors `tags`.
    pub skills: Vec<String>,
    /// Free-text bio; empty when absent.
    pub bio: String,
    /// Free-text location; empty when absent.
    pub location: String,
    /// Searchable tag labels.
    pub tags: Vec<String>,
    /// Whether the passport holder is verified.
    pub verified: bool,
    /// Primary wallet address; empty when absent.
    pub main_wallet: String,
    /// Verified wallet addresses attached to the passport.
    pub social_links: Vec<String>,
    /// Farcaster profile URL; empty unless the passport name is present.
    pub farcaster_url: String,
    /// Explorer contact URL; empty unless the main wallet is present.
    pub contact_url: String,
}

/// Profile sub-object of a raw passport record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawProfile {
    /// Handle-style name.
    pub name: Option<String>,
    /// Human-facing display name.
    pub display_name: Option<String>,
    /// Avatar image URL.
    pub image_url: Option<String>,
    /// Free-text bio.
    pub bio: Option<String>,
    /// Free-text location.
    pub location: Option<String>,
    /// Tag labels (upstream has no separate skills list).
    pub tags: Option<Vec<String>>,
}

/// Raw passport record as served by the upstream search endpoint.
///
/// Every field is optional: the upstream contract is loose and [`normalize`]
/// is the single place where defaults are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPassport {
    /// Numeric passport id.
    pub passport_id: Option<u64>,
    /// Legacy id field some records carry instead of `passport_id`.
    pub id: Option<u64>,
    /// Profile sub-object.
    pub passport_profile: Option<RawProfile>,
    /// Overall score.
    pub score: Option<f64>,
    /// Activity sub-score.
    pub activity_score: Option<f64>,
    /// Identity sub-score.
    pub identity_score: Option<f64>,
    /// Skills sub-score.
    pub skills_score: Option<f64>,
    /// Verification flag.
    pub verified: Option<bool>,
    /// Primary wallet address.
    pub main_wallet: Option<String>,
    /// Verified wallet addresses.
    pub verified_wallets: Option<Vec<String>>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Normalize one raw passport into a canonical [`Builder`].
///
/// Total function: every field has a defined fallback, so normalization
/// never fails. Derived URLs are computed here and only here.
pub fn normalize(raw: RawPassport) -> Builder {
    let profile = raw.passport_profile.unwrap_or_default();

    let profile_name = non_empty(profile.name);
    let profile_display = non_empty(profile.display_name);

    // Same fallback chain in both directions, per the upstream contract:
    // whichever of the two names exists wins, then the placeholder.
    let name = profile_name
        .clone()
        .or_else(|| profile_display.clone())
        .unwrap_or_else(|| UNKNOWN_BUILDER.to_string());
    let display_name = profile_display
        .clone()
        .or_else(|| profile_name.clone())
        .unwrap_or_else(|| UNKNOWN_BUILDER.to_string());

    // Zero ids are treated as absent, like the empty string and missing
    // fields above: a zero passport id falls through to the legacy id.
    let numeric_id = raw
        .passport_id
        .filter(|&v| v != 0)
        .or_else(|| raw.id.filter(|&v| v != 0));
    let passport_id = numeric_id.unwrap_or(0);
    let id = numeric_id.map_or_else(String::new, |v| v.to_string());

    let tags = profile.tags.unwrap_or_default();
    let main_wallet = non_empty(raw.main_wallet).unwrap_or_default();

    // The Farcaster URL keys off the raw profile name, not the fallback
    // chain: a record with only a display name gets no Farcaster link.
    let farcaster_url = profile_name
        .as_deref()
        .map(|n| format!("{FARCASTER_BASE}/{n}"))
        .unwrap_or_default();
    let contact_url = if main_wallet.is_empty() {
        String::new()
    } else {
        format!("{EXPLORER_BASE}/{main_wallet}")
    };

    Builder {
        id,
        passport_id,
        display_name,
        name,
        avatar_url: non_empty(profile.image_url).unwrap_or_default(),
        score: raw.score.unwrap_or(0.0),
        score_breakdown: ScoreBreakdown {
            activity: raw.activity_score.unwrap_or(0.0),
            identity: raw.identity_score.unwrap_or(0.0),
            skills: raw.skills_score.unwrap_or(0.0),
        },
        skills: tags.clone(),
        bio: non_empty(profile.bio).unwrap_or_default(),
        location: non_empty(profile.location).unwrap_or_default(),
        tags,
        verified: raw.verified.unwrap_or(false),
        main_wallet,
        social_links: raw.verified_wallets.unwrap_or_default(),
        farcaster_url,
        contact_url,
    }
}
