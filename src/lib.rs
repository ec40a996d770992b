mod clock;
mod consts;
mod prelude;
mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use consts::*;
pub use types::{DayMask, DayOfWeek, minute_of_day};

use crate::prelude::*;
use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

/// A scheduling window: a set of weekdays plus an inclusive minute-of-day interval.
///
/// The interval is `[start, end]` with both bounds inclusive. A window whose
/// start lies after its end (for example 22:00 to 06:00) does not wrap past
/// midnight; such a rule is never active. See [`CalendarRule::is_overnight`].
///
/// `new` accepts any hour/minute values unchecked. Values outside the clock
/// range produce windows that simply never match; use `try_new` to reject them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(
    fmt = "{}{day_mask}, from {start_hour:02}:{start_min:02} to {end_hour:02}:{end_min:02}",
    DAYS_PREFIX
)]
#[serde(try_from = "RuleConfig", into = "RuleConfig")]
pub struct CalendarRule {
    day_mask:   DayMask,
    start_hour: u8,
    start_min:  u8,
    end_hour:   u8,
    end_min:    u8,
}

/// Error type for rule construction and configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// Hour outside `0..=MAX_HOUR`.
    #[error("Invalid {field} hour: {value} (must be 0-{max})", max = MAX_HOUR)]
    InvalidHour { field: &'static str, value: u8 },

    /// Minute outside `0..=MAX_MINUTE`.
    #[error("Invalid {field} minute: {value} (must be 0-{max})", max = MAX_MINUTE)]
    InvalidMinute { field: &'static str, value: u8 },

    /// The `none` sentinel appeared where a real day was expected.
    #[error("The none sentinel is not a day of the week")]
    SentinelDay,
}

impl CalendarRule {
    /// Creates a rule without checking the hour/minute values.
    pub const fn new(
        day_mask: DayMask,
        start_hour: u8,
        start_min: u8,
        end_hour: u8,
        end_min: u8,
    ) -> Self {
        Self {
            day_mask,
            start_hour,
            start_min,
            end_hour,
            end_min,
        }
    }

    /// Creates a rule, validating every hour and minute.
    /// Overnight windows are accepted as-is and never match.
    ///
    /// # Errors
    /// Returns `RuleError::InvalidHour` or `RuleError::InvalidMinute` for the first
    /// out-of-range field.
    pub fn try_new(
        day_mask: DayMask,
        start_hour: u8,
        start_min: u8,
        end_hour: u8,
        end_min: u8,
    ) -> Result<Self, RuleError> {
        check_time("start", start_hour, start_min)?;
        check_time("end", end_hour, end_min)?;

        let rule = Self::new(day_mask, start_hour, start_min, end_hour, end_min);
        if rule.is_overnight() {
            tracing::debug!(%rule, "window ends before it starts; rule will never be active");
        }
        Ok(rule)
    }

    /// Active all day long on the given days
    pub const fn with_days(day_mask: DayMask) -> Self {
        Self::new(day_mask, DAY_START.0, DAY_START.1, DAY_END.0, DAY_END.1)
    }

    pub const fn day_mask(&self) -> DayMask {
        self.day_mask
    }

    pub const fn start_hour(&self) -> u8 {
        self.start_hour
    }

    pub const fn start_min(&self) -> u8 {
        self.start_min
    }

    pub const fn end_hour(&self) -> u8 {
        self.end_hour
    }

    pub const fn end_min(&self) -> u8 {
        self.end_min
    }

    /// Start of the window in minutes since midnight
    pub const fn start_minutes(&self) -> u16 {
        minute_of_day(self.start_hour, self.start_min)
    }

    /// End of the window in minutes since midnight (inclusive)
    pub const fn end_minutes(&self) -> u16 {
        minute_of_day(self.end_hour, self.end_min)
    }

    /// True when the window ends before it starts. There is no midnight
    /// rollover, so such a rule never matches any instant.
    pub const fn is_overnight(&self) -> bool {
        self.start_minutes() > self.end_minutes()
    }

    /// Checks the rule against an instant, reading weekday, hour and minute in
    /// the instant's own time zone.
    pub fn is_active_at<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> bool {
        let day = DayOfWeek::from_chrono(instant.weekday());
        let minutes = instant.hour() * u32::from(MINUTES_PER_HOUR) + instant.minute();

        let active = self.day_mask.contains(day)
            && u32::from(self.start_minutes()) <= minutes
            && minutes <= u32::from(self.end_minutes());

        tracing::trace!(%day, minutes, active, rule = %self, "evaluated calendar rule");
        active
    }
}

impl Default for CalendarRule {
    /// Every day, all day
    fn default() -> Self {
        Self::with_days(DayMask::all())
    }
}

fn check_time(field: &'static str, hour: u8, minute: u8) -> Result<(), RuleError> {
    if hour > MAX_HOUR {
        return Err(RuleError::InvalidHour { field, value: hour });
    }
    if minute > MAX_MINUTE {
        return Err(RuleError::InvalidMinute {
            field,
            value: minute,
        });
    }
    Ok(())
}

/// Something that can say whether it applies at a given instant.
pub trait ActiveRule {
    /// Evaluates the rule at `instant`
    fn is_active_at(&self, instant: &DateTime<Local>) -> bool;

    /// Evaluates the rule at whatever instant `clock` reports
    fn is_active_with(&self, clock: &dyn Clock) -> bool {
        self.is_active_at(&clock.now())
    }

    /// Evaluates the rule against the live local clock. Each call reads the clock again.
    fn is_active(&self) -> bool {
        self.is_active_with(&SystemClock)
    }
}

impl ActiveRule for CalendarRule {
    fn is_active_at(&self, instant: &DateTime<Local>) -> bool {
        Self::is_active_at(self, instant)
    }
}

/// True when every rule is active at `instant`. An empty slice is vacuously active.
pub fn all_active<R: ActiveRule>(rules: &[R], instant: &DateTime<Local>) -> bool {
    rules.iter().all(|rule| rule.is_active_at(instant))
}

/// Serialized form of a [`CalendarRule`]. Missing fields fall back to the
/// always-active defaults; present fields are validated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
struct RuleConfig {
    days:       DayMask,
    start_hour: u8,
    start_min:  u8,
    end_hour:   u8,
    end_min:    u8,
}

impl Default for RuleConfig {
    fn default() -> Self {
        CalendarRule::default().into()
    }
}

impl From<CalendarRule> for RuleConfig {
    fn from(rule: CalendarRule) -> Self {
        Self {
            days:       rule.day_mask,
            start_hour: rule.start_hour,
            start_min:  rule.start_min,
            end_hour:   rule.end_hour,
            end_min:    rule.end_min,
        }
    }
}

impl TryFrom<RuleConfig> for CalendarRule {
    type Error = RuleError;

    fn try_from(config: RuleConfig) -> Result<Self, Self::Error> {
        Self::try_new(
            config.days,
            config.start_hour,
            config.start_min,
            config.end_hour,
            config.end_min,
        )
    }
}
