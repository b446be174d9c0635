//! Signed span of time with microsecond resolution.

use serde::{Deserialize, Serialize};

pub const MICROSECONDS_PER_MILLISECOND: i64 = 1_000;
pub const MICROSECONDS_PER_SECOND: i64 = 1_000 * MICROSECONDS_PER_MILLISECOND;
pub const MICROSECONDS_PER_MINUTE: i64 = 60 * MICROSECONDS_PER_SECOND;
pub const MICROSECONDS_PER_HOUR: i64 = 60 * MICROSECONDS_PER_MINUTE;
pub const MICROSECONDS_PER_DAY: i64 = 24 * MICROSECONDS_PER_HOUR;
pub const MICROSECONDS_PER_WEEK: i64 = 7 * MICROSECONDS_PER_DAY;
/// An average Gregorian month: 365.25 / 12 days.
pub const MICROSECONDS_PER_MONTH: i64 = 2_629_800 * MICROSECONDS_PER_SECOND;
/// An average Gregorian year: 365.25 days.
pub const MICROSECONDS_PER_YEAR: i64 = 31_557_600 * MICROSECONDS_PER_SECOND;

/// A signed span of time.
///
/// Stored as a microsecond count; every unit conversion is derived from it
/// with integer division truncating toward zero. Constructors and the
/// `+`, `-` and `*` operators saturate at the bounds of `i64` instead of
/// overflowing; `checked_add` and `checked_sub` report overflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Duration {
    micros: i64,
}

impl Duration {
    pub const fn zero() -> Self {
        Self { micros: 0 }
    }

    pub const fn microseconds(micros: i64) -> Self {
        Self { micros }
    }

    pub const fn milliseconds(millis: i64) -> Self {
        Self::scaled(millis, MICROSECONDS_PER_MILLISECOND)
    }

    pub const fn seconds(seconds: i64) -> Self {
        Self::scaled(seconds, MICROSECONDS_PER_SECOND)
    }

    pub const fn minutes(minutes: i64) -> Self {
        Self::scaled(minutes, MICROSECONDS_PER_MINUTE)
    }

    pub const fn hours(hours: i64) -> Self {
        Self::scaled(hours, MICROSECONDS_PER_HOUR)
    }

    pub const fn days(days: i64) -> Self {
        Self::scaled(days, MICROSECONDS_PER_DAY)
    }

    pub const fn weeks(weeks: i64) -> Self {
        Self::scaled(weeks, MICROSECONDS_PER_WEEK)
    }

    /// A span of `months` average months (30.4375 days each).
    ///
    /// Calendar months vary between 28 and 31 days, so this is only an
    /// approximation. Use calendar arithmetic on [`DateTime`](super::DateTime)
    /// when the exact month boundary matters.
    pub const fn months(months: i64) -> Self {
        Self::scaled(months, MICROSECONDS_PER_MONTH)
    }

    /// A span of `years` average years (365.25 days each).
    ///
    /// Same caveat as [`Duration::months`]: leap years make this approximate.
    pub const fn years(years: i64) -> Self {
        Self::scaled(years, MICROSECONDS_PER_YEAR)
    }

    /// Sums the given components.
    pub fn from_parts(
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
        milliseconds: i64,
        microseconds: i64,
    ) -> Self {
        [
            Self::days(days),
            Self::hours(hours),
            Self::minutes(minutes),
            Self::seconds(seconds),
            Self::milliseconds(milliseconds),
            Self::microseconds(microseconds),
        ]
        .into_iter()
        .fold(Self::zero(), |acc, part| acc.saturating_add(part))
    }

    const fn scaled(amount: i64, unit: i64) -> Self {
        Self {
            micros: amount.saturating_mul(unit),
        }
    }

    pub const fn in_microseconds(&self) -> i64 {
        self.micros
    }

    pub const fn in_milliseconds(&self) -> i64 {
        self.micros / MICROSECONDS_PER_MILLISECOND
    }

    pub const fn in_seconds(&self) -> i64 {
        self.micros / MICROSECONDS_PER_SECOND
    }

    pub const fn in_minutes(&self) -> i64 {
        self.micros / MICROSECONDS_PER_MINUTE
    }

    pub const fn in_hours(&self) -> i64 {
        self.micros / MICROSECONDS_PER_HOUR
    }

    pub const fn in_days(&self) -> i64 {
        self.micros / MICROSECONDS_PER_DAY
    }

    pub const fn in_weeks(&self) -> i64 {
        self.micros / MICROSECONDS_PER_WEEK
    }

    /// Whole average months; approximate, see [`Duration::months`].
    pub const fn in_months(&self) -> i64 {
        self.micros / MICROSECONDS_PER_MONTH
    }

    /// Whole average years; approximate, see [`Duration::years`].
    pub const fn in_years(&self) -> i64 {
        self.micros / MICROSECONDS_PER_YEAR
    }

    pub const fn is_negative(&self) -> bool {
        self.micros < 0
    }

    pub const fn is_zero(&self) -> bool {
        self.micros == 0
    }

    /// The magnitude of this span.
    pub const fn abs(&self) -> Self {
        Self {
            micros: self.micros.saturating_abs(),
        }
    }

    /// The same span pointing the other way.
    pub const fn opposite(&self) -> Self {
        Self {
            micros: self.micros.saturating_neg(),
        }
    }

    pub fn checked_add(&self, other: Duration) -> Option<Duration> {
        self.micros.checked_add(other.micros).map(Self::microseconds)
    }

    pub fn checked_sub(&self, other: Duration) -> Option<Duration> {
        self.micros.checked_sub(other.micros).map(Self::microseconds)
    }

    pub fn saturating_add(&self, other: Duration) -> Duration {
        Self::microseconds(self.micros.saturating_add(other.micros))
    }
}

impl std::ops::Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Self) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl std::ops::Sub for Duration {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Self::Output {
        Duration::microseconds(self.micros.saturating_sub(rhs.micros))
    }
}

impl std::ops::Mul<i64> for Duration {
    type Output = Duration;

    fn mul(self, rhs: i64) -> Self::Output {
        Duration::microseconds(self.micros.saturating_mul(rhs))
    }
}

impl std::ops::Neg for Duration {
    type Output = Duration;

    fn neg(self) -> Self::Output {
        self.opposite()
    }
}

impl std::fmt::Display for Duration {
    /// Renders as `[-]H:MM:SS.ffffff`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let micros = self.micros.unsigned_abs();

        let hours = micros / MICROSECONDS_PER_HOUR as u64;
        let minutes = (micros / MICROSECONDS_PER_MINUTE as u64) % 60;
        let seconds = (micros / MICROSECONDS_PER_SECOND as u64) % 60;
        let fraction = micros % MICROSECONDS_PER_SECOND as u64;

        write!(f, "{sign}{hours}:{minutes:02}:{seconds:02}.{fraction:06}")
    }
}
