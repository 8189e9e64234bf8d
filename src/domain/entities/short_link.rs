//! Short link entity mapping a shortcode to its target URL.

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use serde::Serialize;

/// Timestamps are kept at microsecond precision, the resolution of the store.
const TIMESTAMP_PRECISION: u16 = 6;

/// A persisted short link.
///
/// `hash` is derived from `target` and is the primary key. `expires_at` is fixed
/// at creation; only `click_count` changes afterwards, and only upwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortLink {
    pub hash: String,
    pub target: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub click_count: i64,
}

impl ShortLink {
    /// Creates a ShortLink instance.
    pub fn new(
        hash: String,
        target: String,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        click_count: i64,
    ) -> Self {
        Self {
            hash,
            target,
            created_at,
            expires_at,
            click_count,
        }
    }

    /// Returns true if the link is past its expiry at `now`.
    ///
    /// A link is still valid at exactly `expires_at`; it expires strictly after.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Returns true if the link has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Compares everything except the click counter.
    pub fn same_mapping(&self, other: &ShortLink) -> bool {
        self.hash == other.hash
            && self.target == other.target
            && self.created_at == other.created_at
            && self.expires_at == other.expires_at
    }
}

/// Input data for creating a new short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub hash: String,
    pub target: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl NewShortLink {
    /// Builds a creation request expiring `ttl` after `created_at`.
    ///
    /// Both timestamps are truncated to microseconds; a positive `ttl` shorter
    /// than that still yields an expiry one microsecond after creation.
    /// Returns `None` if `ttl` is not positive or the expiry overflows.
    pub fn new(
        hash: String,
        target: String,
        created_at: DateTime<Utc>,
        ttl: TimeDelta,
    ) -> Option<Self> {
        if ttl <= TimeDelta::zero() {
            return None;
        }

        let created_at = created_at.trunc_subsecs(TIMESTAMP_PRECISION);
        let expires_at = created_at
            .checked_add_signed(ttl)?
            .trunc_subsecs(TIMESTAMP_PRECISION)
            .max(created_at.checked_add_signed(TimeDelta::microseconds(1))?);

        Some(Self {
            hash,
            target,
            created_at,
            expires_at,
        })
    }

    /// The record as stored right after a successful insert.
    pub fn into_link(self) -> ShortLink {
        ShortLink::new(self.hash, self.target, self.created_at, self.expires_at, 0)
    }
}
