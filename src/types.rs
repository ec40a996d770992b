use crate::consts::{DAY_LETTERS, DAYS_IN_WEEK, MINUTES_PER_HOUR, NO_DAY_MARKER};
use crate::RuleError;
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Day of the week, with an explicit sentinel for "no day".
/// Each real day carries its ISO number: 1 = Monday through 7 = Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    #[display(fmt = "None")]
    None,
    #[display(fmt = "Monday")]
    Monday,
    #[display(fmt = "Tuesday")]
    Tuesday,
    #[display(fmt = "Wednesday")]
    Wednesday,
    #[display(fmt = "Thursday")]
    Thursday,
    #[display(fmt = "Friday")]
    Friday,
    #[display(fmt = "Saturday")]
    Saturday,
    #[display(fmt = "Sunday")]
    Sunday,
}

/// Sunday-first platform day constants (index = constant, 1 = Sunday .. 7 = Saturday).
/// Index 0 is not a valid constant and maps to the sentinel.
const CALENDAR_DAYS: [DayOfWeek; DAYS_IN_WEEK + 1] = [
    DayOfWeek::None,
    DayOfWeek::Sunday,
    DayOfWeek::Monday,
    DayOfWeek::Tuesday,
    DayOfWeek::Wednesday,
    DayOfWeek::Thursday,
    DayOfWeek::Friday,
    DayOfWeek::Saturday,
];

impl DayOfWeek {
    /// The seven real days, Monday first
    pub const ALL: [Self; DAYS_IN_WEEK] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Returns the integer tag (0 for the sentinel, 1..=7 for Monday..Sunday)
    #[inline]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Inverse of [`DayOfWeek::value`]. Anything outside `1..=7` yields `None`.
    pub const fn from_value(value: u8) -> Self {
        match value {
            1..=7 => Self::ALL[value as usize - 1],
            _ => Self::None,
        }
    }

    /// Maps chrono's weekday through the Monday-first table
    #[inline]
    pub fn from_chrono(weekday: chrono::Weekday) -> Self {
        Self::ALL[weekday.num_days_from_monday() as usize]
    }

    /// Maps a Sunday-first platform day constant (1 = Sunday .. 7 = Saturday).
    /// Unknown constants yield the `None` sentinel.
    pub fn from_calendar_day(constant: u32) -> Self {
        usize::try_from(constant)
            .ok()
            .and_then(|idx| CALENDAR_DAYS.get(idx).copied())
            .unwrap_or(Self::None)
    }

    /// Returns true for the sentinel
    #[inline]
    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    /// Single-letter rendering used by rule summaries
    pub const fn letter(self) -> char {
        match self {
            Self::None => NO_DAY_MARKER,
            day => DAY_LETTERS[day.value() as usize - 1],
        }
    }

    /// Bit for this day inside a [`DayMask`]; the sentinel has none
    const fn bit(self) -> u8 {
        match self {
            Self::None => 0,
            day => 1 << (day.value() - 1),
        }
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(weekday: chrono::Weekday) -> Self {
        Self::from_chrono(weekday)
    }
}

/// Set of real weekdays, one bit per day (bit 0 = Monday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Into, Serialize, Deserialize)]
#[serde(try_from = "Vec<DayOfWeek>", into = "Vec<DayOfWeek>")]
pub struct DayMask(u8);

impl DayMask {
    const FULL: u8 = (1 << DAYS_IN_WEEK) - 1;

    /// A mask with no days
    pub const fn empty() -> Self {
        Self(0)
    }

    /// All seven days
    pub const fn all() -> Self {
        Self(Self::FULL)
    }

    /// Monday through Friday
    pub const fn weekdays() -> Self {
        Self::empty()
            .with(DayOfWeek::Monday)
            .with(DayOfWeek::Tuesday)
            .with(DayOfWeek::Wednesday)
            .with(DayOfWeek::Thursday)
            .with(DayOfWeek::Friday)
    }

    /// Saturday and Sunday
    pub const fn weekend() -> Self {
        Self::empty().with(DayOfWeek::Saturday).with(DayOfWeek::Sunday)
    }

    /// Returns a copy of this mask with `day` added. Adding the sentinel changes nothing.
    #[must_use]
    pub const fn with(self, day: DayOfWeek) -> Self {
        Self(self.0 | day.bit())
    }

    /// Adds `day` to the mask. Adding the sentinel changes nothing.
    pub const fn insert(&mut self, day: DayOfWeek) {
        self.0 |= day.bit();
    }

    /// Returns true if `day` is in the mask. Always false for the sentinel.
    #[inline]
    pub const fn contains(self, day: DayOfWeek) -> bool {
        let bit = day.bit();
        bit != 0 && self.0 & bit != 0
    }

    /// Number of days in the mask
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Contained days in Monday to Sunday order
    pub fn iter(self) -> impl Iterator<Item = DayOfWeek> {
        DayOfWeek::ALL.into_iter().filter(move |day| self.contains(*day))
    }
}

impl FromIterator<DayOfWeek> for DayMask {
    fn from_iter<I: IntoIterator<Item = DayOfWeek>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

impl<const N: usize> From<[DayOfWeek; N]> for DayMask {
    fn from(days: [DayOfWeek; N]) -> Self {
        days.into_iter().collect()
    }
}

impl TryFrom<Vec<DayOfWeek>> for DayMask {
    type Error = RuleError;

    fn try_from(days: Vec<DayOfWeek>) -> Result<Self, Self::Error> {
        if days.iter().any(|day| day.is_none()) {
            return Err(RuleError::SentinelDay);
        }
        Ok(days.into_iter().collect())
    }
}

impl From<DayMask> for Vec<DayOfWeek> {
    fn from(mask: DayMask) -> Self {
        mask.iter().collect()
    }
}

impl fmt::Display for DayMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        DayOfWeek::ALL.iter().try_for_each(|day| {
            let letter = if self.contains(*day) {
                day.letter()
            } else {
                NO_DAY_MARKER
            };
            write!(f, "{letter}")
        })
    }
}

// Helper functions

/// Elapsed minutes since midnight for an hour/minute pair.
/// Values are not range checked; out-of-range input yields out-of-range output.
pub const fn minute_of_day(hour: u8, minute: u8) -> u16 {
    hour as u16 * MINUTES_PER_HOUR + minute as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_values() {
        assert_eq!(DayOfWeek::None.value(), 0);
        assert_eq!(DayOfWeek::Monday.value(), 1);
        assert_eq!(DayOfWeek::Sunday.value(), 7);

        for (idx, day) in DayOfWeek::ALL.iter().enumerate() {
            assert_eq!(usize::from(day.value()), idx + 1, "{day} has the wrong tag");
        }
    }

    #[test]
    fn test_day_from_value() {
        for day in DayOfWeek::ALL {
            assert_eq!(DayOfWeek::from_value(day.value()), day);
        }
        assert_eq!(DayOfWeek::from_value(0), DayOfWeek::None);
        assert_eq!(DayOfWeek::from_value(8), DayOfWeek::None);
        assert_eq!(DayOfWeek::from_value(255), DayOfWeek::None);
    }

    #[test]
    fn test_day_from_chrono() {
        use chrono::Weekday;

        let cases = [
            (Weekday::Mon, DayOfWeek::Monday),
            (Weekday::Tue, DayOfWeek::Tuesday),
            (Weekday::Wed, DayOfWeek::Wednesday),
            (Weekday::Thu, DayOfWeek::Thursday),
            (Weekday::Fri, DayOfWeek::Friday),
            (Weekday::Sat, DayOfWeek::Saturday),
            (Weekday::Sun, DayOfWeek::Sunday),
        ];
        for (weekday, expected) in cases {
            assert_eq!(DayOfWeek::from_chrono(weekday), expected);
            assert_eq!(DayOfWeek::from(weekday), expected);
        }
    }

    #[test]
    fn test_day_from_calendar_day() {
        assert_eq!(DayOfWeek::from_calendar_day(1), DayOfWeek::Sunday);
        assert_eq!(DayOfWeek::from_calendar_day(2), DayOfWeek::Monday);
        assert_eq!(DayOfWeek::from_calendar_day(6), DayOfWeek::Friday);
        assert_eq!(DayOfWeek::from_calendar_day(7), DayOfWeek::Saturday);

        // Unknown constants fall back to the sentinel
        assert_eq!(DayOfWeek::from_calendar_day(0), DayOfWeek::None);
        assert_eq!(DayOfWeek::from_calendar_day(8), DayOfWeek::None);
        assert_eq!(DayOfWeek::from_calendar_day(u32::MAX), DayOfWeek::None);
    }

    #[test]
    fn test_day_letters() {
        let letters: String = DayOfWeek::ALL.iter().map(|d| d.letter()).collect();
        assert_eq!(letters, "MTWTFSS");
        assert_eq!(DayOfWeek::None.letter(), '-');
    }

    #[test]
    fn test_day_display() {
        assert_eq!(DayOfWeek::Wednesday.to_string(), "Wednesday");
        assert_eq!(DayOfWeek::None.to_string(), "None");
    }

    #[test]
    fn test_day_serde() {
        let json = serde_json::to_string(&DayOfWeek::Thursday).unwrap();
        assert_eq!(json, "\"thursday\"");

        let parsed: DayOfWeek = serde_json::from_str("\"sunday\"").unwrap();
        assert_eq!(parsed, DayOfWeek::Sunday);
    }

    #[test]
    fn test_mask_membership() {
        let mask = DayMask::from([DayOfWeek::Monday, DayOfWeek::Friday]);
        assert!(mask.contains(DayOfWeek::Monday));
        assert!(mask.contains(DayOfWeek::Friday));
        assert!(!mask.contains(DayOfWeek::Tuesday));
        assert!(!mask.contains(DayOfWeek::None));
        assert_eq!(mask.len(), 2);
    }

    #[test]
    fn test_mask_sentinel_is_never_stored() {
        let mut mask = DayMask::empty();
        mask.insert(DayOfWeek::None);
        assert!(mask.is_empty());

        let all = DayMask::all().with(DayOfWeek::None);
        assert_eq!(all, DayMask::all());
        assert!(!all.contains(DayOfWeek::None));
    }

    #[test]
    fn test_mask_presets() {
        assert_eq!(DayMask::all().len(), 7);
        assert_eq!(DayMask::weekdays().len(), 5);
        assert_eq!(DayMask::weekend().len(), 2);
        assert!(DayMask::weekend().contains(DayOfWeek::Sunday));
        assert!(!DayMask::weekdays().contains(DayOfWeek::Saturday));

        let union: DayMask = DayMask::weekdays().iter().chain(DayMask::weekend().iter()).collect();
        assert_eq!(union, DayMask::all());
    }

    #[test]
    fn test_mask_insertion_order_irrelevant() {
        let a = DayMask::from([DayOfWeek::Sunday, DayOfWeek::Monday, DayOfWeek::Wednesday]);
        let b = DayMask::from([DayOfWeek::Wednesday, DayOfWeek::Sunday, DayOfWeek::Monday]);
        assert_eq!(a, b);
        assert_eq!(
            a.iter().collect::<Vec<_>>(),
            vec![DayOfWeek::Monday, DayOfWeek::Wednesday, DayOfWeek::Sunday]
        );
    }

    #[test]
    fn test_mask_bits() {
        let bits: u8 = DayMask::from([DayOfWeek::Monday, DayOfWeek::Sunday]).into();
        assert_eq!(bits, 0b100_0001);
        assert_eq!(u8::from(DayMask::all()), 0b111_1111);
    }

    #[test]
    fn test_mask_display() {
        assert_eq!(DayMask::all().to_string(), "MTWTFSS");
        assert_eq!(DayMask::empty().to_string(), "-------");
        assert_eq!(DayMask::weekend().to_string(), "-----SS");
        assert_eq!(DayMask::from([DayOfWeek::Thursday]).to_string(), "---T---");
    }

    #[test]
    fn test_mask_serde() {
        let mask = DayMask::from([DayOfWeek::Friday, DayOfWeek::Tuesday]);
        let json = serde_json::to_string(&mask).unwrap();
        assert_eq!(json, r#"["tuesday","friday"]"#);

        let parsed: DayMask = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, mask);
    }

    #[test]
    fn test_mask_serde_rejects_sentinel() {
        let result: Result<DayMask, _> = serde_json::from_str(r#"["monday","none"]"#);
        assert!(result.is_err());
        assert!(matches!(
            DayMask::try_from(vec![DayOfWeek::None]),
            Err(RuleError::SentinelDay)
        ));
    }

    #[test]
    fn test_minute_of_day() {
        assert_eq!(minute_of_day(0, 0), 0);
        assert_eq!(minute_of_day(1, 0), 60);
        assert_eq!(minute_of_day(12, 30), 750);
        assert_eq!(minute_of_day(23, 59), 1439);
        // Not range checked
        assert_eq!(minute_of_day(25, 0), 1500);
    }
}
