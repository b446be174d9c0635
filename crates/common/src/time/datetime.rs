//! UTC instant with calendar helpers.

use chrono::{
    Datelike, NaiveDate, NaiveDateTime, SecondsFormat, TimeDelta, TimeZone, Timelike, Utc,
    Weekday,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Clock, Duration, SystemClock};

/// Reasons a date-time cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateTimeError {
    #[error("'{0}' is not a recognised ISO-8601 date-time")]
    InvalidFormat(String),

    #[error("date-time components are out of range")]
    OutOfRange,
}

/// An immutable instant on the UTC time line.
///
/// Serializes to and parses from ISO-8601. All calendar helpers (month
/// boundaries, week layout, "today") are evaluated in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateTime(chrono::DateTime<Utc>);

impl DateTime {
    /// The current instant from the system clock.
    pub fn now() -> Self {
        SystemClock.now()
    }

    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self, DateTimeError> {
        Utc.with_ymd_and_hms(year, month, day, hour, minute, second)
            .single()
            .map(Self)
            .ok_or(DateTimeError::OutOfRange)
    }

    pub fn from_ymd_hms_milli(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        millisecond: u32,
    ) -> Result<Self, DateTimeError> {
        if millisecond > 999 {
            return Err(DateTimeError::OutOfRange);
        }
        let base = Self::from_ymd_hms(year, month, day, hour, minute, second)?;
        Ok(base.add(Duration::milliseconds(i64::from(millisecond))))
    }

    pub fn from_millis_since_epoch(millis: i64) -> Result<Self, DateTimeError> {
        let micros = millis
            .checked_mul(1_000)
            .ok_or(DateTimeError::OutOfRange)?;
        Self::from_micros_since_epoch(micros)
    }

    pub fn from_micros_since_epoch(micros: i64) -> Result<Self, DateTimeError> {
        let seconds = micros.div_euclid(1_000_000);
        let nanos = (micros.rem_euclid(1_000_000) * 1_000) as u32;
        chrono::DateTime::from_timestamp(seconds, nanos)
            .map(Self)
            .ok_or(DateTimeError::OutOfRange)
    }

    /// Parses an ISO-8601 string.
    ///
    /// Accepted shapes:
    /// - RFC 3339 with any offset (`2023-11-21T10:00:00+02:00`), normalized to UTC
    /// - a naive date-time (`2023-11-21T10:00:00.250`), read as UTC
    /// - a bare date (`2023-11-21`), read as midnight UTC
    pub fn parse(input: &str) -> Result<Self, DateTimeError> {
        let text = input.trim();

        if let Ok(parsed) = chrono::DateTime::parse_from_rfc3339(text) {
            return Ok(Self(parsed.with_timezone(&Utc)));
        }

        if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Self(Utc.from_utc_datetime(&naive)));
        }

        if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            return Ok(Self::midnight(date));
        }

        Err(DateTimeError::InvalidFormat(input.to_string()))
    }

    fn midnight(date: NaiveDate) -> Self {
        Self(Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN)))
    }

    /// Underlying chrono value.
    pub fn as_chrono(&self) -> chrono::DateTime<Utc> {
        self.0
    }

    pub fn millis_since_epoch(&self) -> i64 {
        self.0.timestamp_millis()
    }

    pub fn micros_since_epoch(&self) -> i64 {
        self.0.timestamp_micros()
    }

    // Components

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month of the year, 1..=12.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day of the month, 1..=31.
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn second(&self) -> u32 {
        self.0.second()
    }

    /// Millisecond within the second, 0..=999.
    pub fn millisecond(&self) -> u32 {
        (self.0.nanosecond() / 1_000_000) % 1_000
    }

    /// Microsecond within the millisecond, 0..=999.
    pub fn microsecond(&self) -> u32 {
        (self.0.nanosecond() / 1_000) % 1_000
    }

    /// Day of the week, 1 (Monday) ..= 7 (Sunday).
    pub fn weekday(&self) -> u32 {
        self.0.weekday().number_from_monday()
    }

    /// Day of the year, 1..=366.
    pub fn day_of_year(&self) -> u32 {
        self.0.ordinal()
    }

    // Comparison

    pub fn is_before(&self, other: &DateTime) -> bool {
        self.0 < other.0
    }

    pub fn is_after(&self, other: &DateTime) -> bool {
        self.0 > other.0
    }

    pub fn is_at_same_moment_as(&self, other: &DateTime) -> bool {
        self.0 == other.0
    }

    pub fn is_same_or_before(&self, other: &DateTime) -> bool {
        self.0 <= other.0
    }

    pub fn is_same_or_after(&self, other: &DateTime) -> bool {
        self.0 >= other.0
    }

    /// Strictly between `start` and `end`; the bounds themselves are excluded.
    pub fn is_between(&self, start: &DateTime, end: &DateTime) -> bool {
        self.is_after(start) && self.is_before(end)
    }

    pub fn is_between_inclusive(&self, start: &DateTime, end: &DateTime) -> bool {
        self.is_same_or_after(start) && self.is_same_or_before(end)
    }

    // Arithmetic

    /// Shifts forward by `duration`, saturating at the representable range
    /// (roughly ±262,000 years). Use [`DateTime::checked_add`] to detect
    /// saturation.
    pub fn add(&self, duration: Duration) -> DateTime {
        self.checked_add(duration)
            .unwrap_or_else(|| Self::bound_towards(duration.in_microseconds()))
    }

    /// Shifts backward by `duration`. Saturates like [`DateTime::add`].
    pub fn subtract(&self, duration: Duration) -> DateTime {
        self.checked_sub(duration)
            .unwrap_or_else(|| Self::bound_towards(duration.opposite().in_microseconds()))
    }

    fn bound_towards(micros: i64) -> DateTime {
        if micros < 0 {
            Self(chrono::DateTime::<Utc>::MIN_UTC)
        } else {
            Self(chrono::DateTime::<Utc>::MAX_UTC)
        }
    }

    pub fn checked_add(&self, duration: Duration) -> Option<DateTime> {
        self.0
            .checked_add_signed(TimeDelta::microseconds(duration.in_microseconds()))
            .map(Self)
    }

    pub fn checked_sub(&self, duration: Duration) -> Option<DateTime> {
        self.0
            .checked_sub_signed(TimeDelta::microseconds(duration.in_microseconds()))
            .map(Self)
    }

    /// `self - other` as a duration (negative when `self` is earlier).
    pub fn difference(&self, other: &DateTime) -> Duration {
        let delta = self.0 - other.0;
        let micros = match delta.num_microseconds() {
            Some(micros) => micros,
            None if delta < TimeDelta::zero() => i64::MIN,
            None => i64::MAX,
        };
        Duration::microseconds(micros)
    }

    // Serialization

    /// Renders `YYYY-MM-DDTHH:MM:SS.mmmZ`.
    pub fn to_iso8601_string(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    // Calendar

    pub fn start_of_day(&self) -> DateTime {
        Self::midnight(self.0.date_naive())
    }

    /// The last microsecond of the day.
    pub fn end_of_day(&self) -> DateTime {
        self.start_of_day()
            .add(Duration::days(1))
            .subtract(Duration::microseconds(1))
    }

    /// Midnight on the first day of this month.
    pub fn first_day_of_month(&self) -> DateTime {
        Self::midnight(self.first_date_of_month())
    }

    /// Midnight on the last day of this month.
    pub fn last_day_of_month(&self) -> DateTime {
        Self::midnight(self.last_date_of_month())
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_date_of_month().day()
    }

    /// Midnight on the first day of the week that contains the 1st of this
    /// month, weeks starting on `week_start`.
    pub fn first_day_of_month_week(&self, week_start: Weekday) -> DateTime {
        let first = self.first_date_of_month();
        let offset = days_after(week_start, first.weekday());
        Self::midnight(first - chrono::Days::new(u64::from(offset)))
    }

    /// Midnight on the last day of the week that contains the last day of
    /// this month, weeks starting on `week_start`.
    pub fn last_day_of_month_week(&self, week_start: Weekday) -> DateTime {
        let last = self.last_date_of_month();
        let week_end = week_start.pred();
        let offset = days_after(last.weekday(), week_end);
        Self::midnight(last + chrono::Days::new(u64::from(offset)))
    }

    /// Every day (at midnight) of the weeks a month calendar displays,
    /// including the spill-over days of the neighbouring months. The length
    /// is always a multiple of seven.
    pub fn month_calendar_days(&self, week_start: Weekday) -> Vec<DateTime> {
        let first = self.first_day_of_month_week(week_start).0.date_naive();
        let last = self.last_day_of_month_week(week_start).0.date_naive();

        first
            .iter_days()
            .take_while(|day| *day <= last)
            .map(Self::midnight)
            .collect()
    }

    pub fn is_same_month(&self, other: &DateTime) -> bool {
        self.year() == other.year() && self.month() == other.month()
    }

    pub fn is_same_day(&self, other: &DateTime) -> bool {
        self.0.date_naive() == other.0.date_naive()
    }

    /// Whether this instant falls on the current UTC day.
    pub fn is_today(&self) -> bool {
        self.is_today_at(&SystemClock)
    }

    /// Whether this instant falls on the day `clock` reports as now.
    pub fn is_today_at(&self, clock: &dyn Clock) -> bool {
        self.is_same_day(&clock.now())
    }

    fn first_date_of_month(&self) -> NaiveDate {
        self.0.date_naive().with_day(1).unwrap_or(self.0.date_naive())
    }

    fn last_date_of_month(&self) -> NaiveDate {
        let first = self.first_date_of_month();
        let next_month = first + chrono::Months::new(1);
        next_month.pred_opt().unwrap_or(first)
    }
}

/// How many days `to` comes after `from` within one week.
fn days_after(from: Weekday, to: Weekday) -> u32 {
    (to.num_days_from_monday() + 7 - from.num_days_from_monday()) % 7
}

impl From<chrono::DateTime<Utc>> for DateTime {
    fn from(value: chrono::DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl From<DateTime> for chrono::DateTime<Utc> {
    fn from(value: DateTime) -> Self {
        value.0
    }
}

impl TryFrom<String> for DateTime {
    type Error = DateTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// Keeps every stored fraction digit so a round trip is exact.
impl From<DateTime> for String {
    fn from(value: DateTime) -> Self {
        value.0.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

impl std::str::FromStr for DateTime {
    type Err = DateTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601_string())
    }
}

impl std::ops::Add<Duration> for DateTime {
    type Output = DateTime;

    fn add(self, rhs: Duration) -> Self::Output {
        DateTime::add(&self, rhs)
    }
}

impl std::ops::Sub<Duration> for DateTime {
    type Output = DateTime;

    fn sub(self, rhs: Duration) -> Self::Output {
        self.subtract(rhs)
    }
}

impl std::ops::Sub for DateTime {
    type Output = Duration;

    fn sub(self, rhs: DateTime) -> Self::Output {
        self.difference(&rhs)
    }
}
