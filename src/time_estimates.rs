//! Projected crack times under four attacker budgets.

use crate::localize;

const MINUTE: f64 = 60.0;
const HOUR: f64 = MINUTE * 60.0;
const DAY: f64 = HOUR * 24.0;
const YEAR: f64 = 365.2425 * DAY;
const MONTH: f64 = YEAR / 12.0;
const CENTURY: f64 = YEAR * 100.0;

/// Guesses per second under each attack scenario.
const ONLINE_THROTTLED: f64 = 100.0 / 3600.0;
const ONLINE_UNTHROTTLED: f64 = 100.0;
const OFFLINE_SLOW_HASHING: f64 = 1e4;
const OFFLINE_FAST_HASHING: f64 = 1e10;

/// Seconds to exhaust the guess count under each attacker budget.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "ser",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct CrackTimes {
    /// A rate-limited online attack, 100 guesses per hour.
    pub online_throttling_100_per_hour: f64,
    /// An unthrottled online attack, 100 guesses per second.
    pub online_no_throttling_100_per_second: f64,
    /// An offline attack against a slow hash, 10^4 guesses per second.
    pub offline_slow_hashing_1e4_per_second: f64,
    /// An offline attack against a fast hash, 10^10 guesses per second.
    pub offline_fast_hashing_1e10_per_second: f64,
}

pub(crate) fn estimate_crack_times(guesses: f64) -> CrackTimes {
    CrackTimes {
        online_throttling_100_per_hour: guesses / ONLINE_THROTTLED,
        online_no_throttling_100_per_second: guesses / ONLINE_UNTHROTTLED,
        offline_slow_hashing_1e4_per_second: guesses / OFFLINE_SLOW_HASHING,
        offline_fast_hashing_1e10_per_second: guesses / OFFLINE_FAST_HASHING,
    }
}

/// Human-readable renderings of [`CrackTimes`], localized at evaluation
/// time.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "ser",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct CrackTimesDisplay {
    /// Display form of the throttled online estimate.
    pub online_throttling_100_per_hour: String,
    /// Display form of the unthrottled online estimate.
    pub online_no_throttling_100_per_second: String,
    /// Display form of the slow-hash offline estimate.
    pub offline_slow_hashing_1e4_per_second: String,
    /// Display form of the fast-hash offline estimate.
    pub offline_fast_hashing_1e10_per_second: String,
}

/// A crack time bucketed into a human-sized unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DisplayTime {
    Instant,
    Minutes(u64),
    Hours(u64),
    Days(u64),
    Months(u64),
    Years(u64),
    Centuries,
}

pub(crate) fn display_time(seconds: f64) -> DisplayTime {
    if seconds < MINUTE {
        DisplayTime::Instant
    } else if seconds < HOUR {
        DisplayTime::Minutes(1 + (seconds / MINUTE).ceil() as u64)
    } else if seconds < DAY {
        DisplayTime::Hours(1 + (seconds / HOUR).ceil() as u64)
    } else if seconds < MONTH {
        DisplayTime::Days(1 + (seconds / DAY).ceil() as u64)
    } else if seconds < YEAR {
        DisplayTime::Months(1 + (seconds / MONTH).ceil() as u64)
    } else if seconds < CENTURY {
        DisplayTime::Years(1 + (seconds / YEAR).ceil() as u64)
    } else {
        DisplayTime::Centuries
    }
}

impl DisplayTime {
    /// The canonical phrase for this bucket, count included where the
    /// unit takes one.
    pub(crate) fn render(self, translate: impl Fn(&str) -> String) -> String {
        match self {
            DisplayTime::Instant => translate(localize::TIME_INSTANT),
            DisplayTime::Minutes(n) => format!("{} {}", n, translate(localize::TIME_MINUTES)),
            DisplayTime::Hours(n) => format!("{} {}", n, translate(localize::TIME_HOURS)),
            DisplayTime::Days(n) => format!("{} {}", n, translate(localize::TIME_DAYS)),
            DisplayTime::Months(n) => format!("{} {}", n, translate(localize::TIME_MONTHS)),
            DisplayTime::Years(n) => format!("{} {}", n, translate(localize::TIME_YEARS)),
            DisplayTime::Centuries => translate(localize::TIME_CENTURIES),
        }
    }
}
