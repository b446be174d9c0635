//! Calendar arithmetic: [`DateTime`], [`Duration`] and [`Clock`].

mod clock;
mod datetime;
mod duration;

pub use chrono::Weekday;
pub use clock::{Clock, FixedClock, SystemClock};
pub use datetime::{DateTime, DateTimeError};
pub use duration::{
    Duration, MICROSECONDS_PER_DAY, MICROSECONDS_PER_HOUR, MICROSECONDS_PER_MILLISECOND,
    MICROSECONDS_PER_MINUTE, MICROSECONDS_PER_MONTH, MICROSECONDS_PER_SECOND,
    MICROSECONDS_PER_WEEK, MICROSECONDS_PER_YEAR,
};
