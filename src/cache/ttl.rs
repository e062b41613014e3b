//! TTL Policy Module
//!
//! Chooses how long a cached dataset stays fresh based on the day of week
//! in a fixed reference timezone. Competition Saturdays refresh every few
//! minutes, the days either side every half hour, and the rest once a day.

use chrono::{DateTime, Datelike, Duration, FixedOffset, Offset, Utc, Weekday};

/// Reference timezone offset used when none is configured (CST, UTC-6).
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = -6;

// == TTL Bucket ==
/// Traffic class of a weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtlBucket {
    /// Live competition day (Saturday)
    Competition,
    /// Day before or after competition (Friday, Sunday)
    Shoulder,
    /// Any other day
    Quiet,
}

impl TtlBucket {
    /// Classifies a weekday.
    pub fn for_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sat => TtlBucket::Competition,
            Weekday::Fri | Weekday::Sun => TtlBucket::Shoulder,
            _ => TtlBucket::Quiet,
        }
    }
}

// == TTL Policy ==
/// Day-of-week sensitive cache lifetime policy.
#[derive(Debug, Clone, Copy)]
pub struct TtlPolicy {
    offset: FixedOffset,
    competition: Duration,
    shoulder: Duration,
    quiet: Duration,
}

impl TtlPolicy {
    /// Creates the standard policy (5 min / 30 min / 24 h) in the given
    /// reference timezone. Offsets are clamped to +/-23 hours.
    pub fn with_utc_offset_hours(hours: i32) -> Self {
        let offset = FixedOffset::east_opt(hours.clamp(-23, 23) * 3600)
            .unwrap_or_else(|| Utc.fix());

        Self {
            offset,
            competition: Duration::minutes(5),
            shoulder: Duration::minutes(30),
            quiet: Duration::hours(24),
        }
    }

    /// Overrides the three bucket lifetimes. Each is raised to at least one
    /// second so an entry always expires strictly after it was written.
    pub fn with_durations(mut self, competition: Duration, shoulder: Duration, quiet: Duration) -> Self {
        let floor = Duration::seconds(1);
        self.competition = competition.max(floor);
        self.shoulder = shoulder.max(floor);
        self.quiet = quiet.max(floor);
        self
    }

    /// Lifetime for a weekday bucket.
    pub fn ttl_for_bucket(&self, bucket: TtlBucket) -> Duration {
        match bucket {
            TtlBucket::Competition => self.competition,
            TtlBucket::Shoulder => self.shoulder,
            TtlBucket::Quiet => self.quiet,
        }
    }

    /// Weekday of `now` as observed in the reference timezone.
    pub fn weekday_at(&self, now: DateTime<Utc>) -> Weekday {
        now.with_timezone(&self.offset).weekday()
    }

    /// Lifetime for an entry written at `now`.
    pub fn ttl_at(&self, now: DateTime<Utc>) -> Duration {
        self.ttl_for_bucket(TtlBucket::for_weekday(self.weekday_at(now)))
    }
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self::with_utc_offset_hours(DEFAULT_UTC_OFFSET_HOURS)
    }
}
