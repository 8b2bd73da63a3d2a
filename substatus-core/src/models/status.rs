//! Subscription status types.
//!
//! This module contains:
//! - [`PremiumState`] - Tri-state subscription state
//! - [`ProviderStatus`] - Normalized per-provider status record
//! - [`Severity`] - Days-remaining classification buckets
//! - [`AggregationResult`] - Merged output of one fan-out
//!
//! Record invariants (upheld by the constructors here):
//! - `Inactive` implies `days_remaining == Some(0)` and `expires_at == None`.
//! - `error == true` implies `Unknown` with no days and no expiry.
//! - `days_remaining` is never negative (it is unsigned).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ProviderFailure;
use crate::models::provider::ProviderKind;

// ============================================================================
// Premium State
// ============================================================================

/// Whether a subscription is active, per the provider's own answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PremiumState {
    /// The provider confirmed an active subscription.
    Active,
    /// The provider confirmed there is no active subscription.
    Inactive,
    /// The lookup could not resolve the state.
    #[default]
    Unknown,
}

impl PremiumState {
    /// Returns true when the state was actually resolved by the provider.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

// ============================================================================
// Provider Status
// ============================================================================

/// Normalized subscription status for one provider lookup.
///
/// A broken credential still occupies a slot in the aggregated output, so a
/// caller can distinguish "confirmed inactive" from "could not be reached".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderStatus {
    /// The provider this record describes.
    pub provider: ProviderKind,
    /// Resolved subscription state.
    pub premium: PremiumState,
    /// Whole days remaining, rounded up. `None` when unresolved.
    pub days_remaining: Option<u32>,
    /// Expiry instant, when known.
    pub expires_at: Option<DateTime<Utc>>,
    /// Best-effort display identifier for the account.
    pub username: Option<String>,
    /// Diagnostic string for unknown or inactive-with-reason cases.
    pub note: Option<String>,
    /// True iff the lookup itself failed (not a confirmed-inactive state).
    pub error: bool,
}

impl ProviderStatus {
    /// Builds an active record. `days` may be unresolved when the provider
    /// confirms the subscription without a usable time field.
    pub fn active(
        provider: ProviderKind,
        days: Option<u32>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            provider,
            premium: PremiumState::Active,
            days_remaining: days,
            expires_at,
            username: None,
            note: None,
            error: false,
        }
    }

    /// Builds a confirmed-inactive record. Days are forced to zero and the
    /// expiry cleared, regardless of any stray time field in the payload.
    pub fn inactive(provider: ProviderKind) -> Self {
        Self {
            provider,
            premium: PremiumState::Inactive,
            days_remaining: Some(0),
            expires_at: None,
            username: None,
            note: None,
            error: false,
        }
    }

    /// Builds a failed-lookup record from the failure taxonomy. The failure's
    /// message becomes the note.
    pub fn failed(provider: ProviderKind, failure: &ProviderFailure) -> Self {
        Self {
            provider,
            premium: PremiumState::Unknown,
            days_remaining: None,
            expires_at: None,
            username: None,
            note: Some(failure.to_string()),
            error: true,
        }
    }

    /// Attaches a best-effort username.
    pub fn with_username(mut self, username: Option<String>) -> Self {
        self.username = username;
        self
    }

    /// Attaches a diagnostic note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Classifies this record into a severity bucket.
    pub fn severity(&self) -> Severity {
        Severity::of(self)
    }
}

// ============================================================================
// Severity
// ============================================================================

/// Severity buckets over days remaining, first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Zero days left, or a confirmed-inactive account.
    Expired,
    /// Three days or fewer remaining.
    Critical,
    /// Fourteen days or fewer remaining.
    Warning,
    /// More than fourteen days remaining.
    Ok,
}

impl Severity {
    /// Classifies a whole-days-remaining value.
    pub fn from_days(days: u32) -> Self {
        if days == 0 {
            Self::Expired
        } else if days <= 3 {
            Self::Critical
        } else if days <= 14 {
            Self::Warning
        } else {
            Self::Ok
        }
    }

    /// Classifies a full status record.
    ///
    /// An active subscription with unresolved days gets the most permissive
    /// bucket for display. Unresolved days on anything else classify as
    /// expired, mirroring the zero fallback of the presentation layer.
    pub fn of(status: &ProviderStatus) -> Self {
        match status.days_remaining {
            Some(days) => Self::from_days(days),
            None if status.premium == PremiumState::Active => Self::Ok,
            None => Self::Expired,
        }
    }

    /// Returns a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Expired => "Expired",
            Self::Critical => "Critical",
            Self::Warning => "Warning",
            Self::Ok => "OK",
        }
    }

    /// Returns an emoji for the bucket.
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Expired => "\u{1f534}",
            Self::Critical => "\u{1f7e0}",
            Self::Warning => "\u{1f7e1}",
            Self::Ok => "\u{1f7e2}",
        }
    }

    /// Returns true for the buckets worth surfacing urgently.
    pub fn is_expiring(&self) -> bool {
        matches!(self, Self::Expired | Self::Critical)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.emoji(), self.label())
    }
}

// ============================================================================
// Aggregation Result
// ============================================================================

/// The merged outcome of one fan-out across enabled providers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregationResult {
    /// Per-provider statuses, in the caller's enable order.
    pub statuses: Vec<ProviderStatus>,
    /// True iff at least one entry resolved a state or carries a username.
    pub has_data: bool,
    /// Orchestration-level failure, distinct from per-provider errors.
    pub error: Option<String>,
}

impl AggregationResult {
    /// The empty result for a request with no enabled providers.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a result from a merged status sequence, computing `has_data`.
    pub fn from_statuses(statuses: Vec<ProviderStatus>) -> Self {
        let has_data = statuses
            .iter()
            .any(|s| s.premium.is_resolved() || s.username.is_some());
        Self {
            statuses,
            has_data,
            error: None,
        }
    }

    /// Builds a result for an orchestration failure. Nothing is cached for
    /// these.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            statuses: Vec::new(),
            has_data: false,
            error: Some(message.into()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
