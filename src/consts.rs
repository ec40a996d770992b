/// Minutes in one hour
pub const MINUTES_PER_HOUR: u16 = 60;

/// Highest valid hour on a 24-hour clock (inclusive)
pub const MAX_HOUR: u8 = 23;

/// Highest valid minute within an hour (inclusive)
pub const MAX_MINUTE: u8 = 59;

/// Number of real days in a week (the `None` sentinel is not counted)
pub const DAYS_IN_WEEK: usize = 7;

/// Display letters for each day, Monday first.
/// Tuesday/Thursday and Saturday/Sunday share a letter; the position tells them apart.
pub const DAY_LETTERS: [char; DAYS_IN_WEEK] = [
    'M', // Monday
    'T', // Tuesday
    'W', // Wednesday
    'T', // Thursday
    'F', // Friday
    'S', // Saturday
    'S', // Sunday
];

/// Placeholder letter for a day absent from a mask
pub const NO_DAY_MARKER: char = '-';

/// Leading label of a rendered rule
pub const DAYS_PREFIX: &str = "Days=";

/// Start of the default, always-active window
pub(crate) const DAY_START: (u8, u8) = (0, 0);
/// End of the default, always-active window
pub(crate) const DAY_END: (u8, u8) = (MAX_HOUR, MAX_MINUTE);
