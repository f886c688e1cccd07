//! Time service trait, timestamp type and implementations.

use linsim_types::error::Result;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// ---------------------------------------------------------------------------
// Timestamp
// ---------------------------------------------------------------------------

/// A simple UTC wall-clock timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SystemTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl SystemTime {
    /// Build a timestamp from a calendar date at midnight.
    pub fn date(year: u16, month: u8, day: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
        }
    }

    /// Break seconds since the Unix epoch into calendar fields.
    pub fn from_unix_secs(secs: u64) -> Self {
        let days = secs / 86400;
        let time_of_day = secs % 86400;
        let (year, month, day) = days_to_ymd(days);
        Self {
            year,
            month,
            day,
            hour: (time_of_day / 3600) as u8,
            minute: ((time_of_day % 3600) / 60) as u8,
            second: (time_of_day % 60) as u8,
        }
    }

    /// Three-letter weekday name.
    pub fn weekday_name(&self) -> &'static str {
        let days = days_from_ymd(self.year, self.month, self.day);
        WEEKDAYS[(days + 4).rem_euclid(7) as usize]
    }

    /// Three-letter month name.
    pub fn month_name(&self) -> &'static str {
        MONTHS[usize::from(self.month.clamp(1, 12) - 1)]
    }

    /// `Mon Jan 15 2024`
    pub fn to_date_string(&self) -> String {
        format!(
            "{} {} {:02} {}",
            self.weekday_name(),
            self.month_name(),
            self.day,
            self.year
        )
    }

    /// `2024-01-15T10:30:00.000Z`
    pub fn to_iso8601(&self) -> String {
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.000Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }

    /// `Mon Jan 15 10:30:00 UTC 2024`, the format of `date(1)`.
    pub fn to_ctime(&self) -> String {
        format!(
            "{} {} {:2} {} UTC {}",
            self.weekday_name(),
            self.month_name(),
            self.day,
            self.clock(),
            self.year
        )
    }

    /// `10:30:00`
    pub fn clock(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }

    /// `Jan 15 10:30`, the timestamp column of `ls -l`.
    pub fn to_listing_stamp(&self) -> String {
        format!(
            "{} {:2} {:02}:{:02}",
            self.month_name(),
            self.day,
            self.hour,
            self.minute
        )
    }
}

impl std::fmt::Display for SystemTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second,
        )
    }
}

// ---------------------------------------------------------------------------
// Time service
// ---------------------------------------------------------------------------

/// Abstraction over the wall clock.
pub trait TimeService {
    /// Current wall-clock time.
    fn now(&self) -> Result<SystemTime>;

    /// Seconds since the simulated machine booted.
    fn uptime_secs(&self) -> Result<u64>;
}

/// Host wall clock; uptime counts from construction.
pub struct DesktopTime {
    start_time: std::time::Instant,
}

impl DesktopTime {
    pub fn new() -> Self {
        Self {
            start_time: std::time::Instant::now(),
        }
    }
}

impl Default for DesktopTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeService for DesktopTime {
    fn now(&self) -> Result<SystemTime> {
        use std::time::SystemTime as StdTime;
        let secs = StdTime::now()
            .duration_since(StdTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Ok(SystemTime::from_unix_secs(secs))
    }

    fn uptime_secs(&self) -> Result<u64> {
        Ok(self.start_time.elapsed().as_secs())
    }
}

/// A clock frozen at one instant. Makes every time-bearing output
/// reproducible.
#[derive(Debug, Clone, Copy)]
pub struct FixedTime {
    time: SystemTime,
    uptime: u64,
}

impl FixedTime {
    pub fn new(time: SystemTime, uptime: u64) -> Self {
        Self { time, uptime }
    }
}

impl TimeService for FixedTime {
    fn now(&self) -> Result<SystemTime> {
        Ok(self.time)
    }

    fn uptime_secs(&self) -> Result<u64> {
        Ok(self.uptime)
    }
}

// ---------------------------------------------------------------------------
// Date helpers
// ---------------------------------------------------------------------------

/// Convert days since Unix epoch to (year, month, day).
pub(crate) fn days_to_ymd(mut days: u64) -> (u16, u8, u8) {
    let mut year = 1970u16;
    loop {
        let year_days = if is_leap(year) { 366 } else { 365 };
        if days < year_days {
            break;
        }
        days -= year_days;
        year += 1;
    }
    let leap = is_leap(year);
    let month_days: [u64; 12] = [
        31,
        if leap { 29 } else { 28 },
        31,
        30,
        31,
        30,
        31,
        31,
        30,
        31,
        30,
        31,
    ];
    let mut month = 0u8;
    for (i, &md) in month_days.iter().enumerate() {
        if days < md {
            month = (i + 1) as u8;
            break;
        }
        days -= md;
    }
    if month == 0 {
        month = 12;
    }
    (year, month, (days + 1) as u8)
}

/// Convert a civil date to days since the Unix epoch (proleptic Gregorian).
pub(crate) fn days_from_ymd(year: u16, month: u8, day: u8) -> i64 {
    let month = i64::from(month.clamp(1, 12));
    let y = i64::from(year) - i64::from(month <= 2);
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

pub(crate) fn is_leap(y: u16) -> bool {
    (y.is_multiple_of(4) && !y.is_multiple_of(100)) || y.is_multiple_of(400)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SystemTime {
        SystemTime {
            year: 2024,
            month: 1,
            day: 15,
            hour: 10,
            minute: 30,
            second: 5,
        }
    }

    #[test]
    fn display_format() {
        assert_eq!(sample().to_string(), "2024-01-15 10:30:05");
    }

    #[test]
    fn date_string() {
        assert_eq!(sample().to_date_string(), "Mon Jan 15 2024");
    }

    #[test]
    fn iso8601() {
        assert_eq!(sample().to_iso8601(), "2024-01-15T10:30:05.000Z");
    }

    #[test]
    fn ctime() {
        assert_eq!(sample().to_ctime(), "Mon Jan 15 10:30:05 UTC 2024");
    }

    #[test]
    fn ctime_pads_single_digit_day() {
        let t = SystemTime::date(2024, 3, 1);
        assert_eq!(t.to_ctime(), "Fri Mar  1 00:00:00 UTC 2024");
    }

    #[test]
    fn listing_stamp() {
        assert_eq!(sample().to_listing_stamp(), "Jan 15 10:30");
    }

    #[test]
    fn from_unix_secs_epoch() {
        let t = SystemTime::from_unix_secs(0);
        assert_eq!(t, SystemTime::date(1970, 1, 1));
        assert_eq!(t.weekday_name(), "Thu");
    }

    #[test]
    fn from_unix_secs_time_of_day() {
        // 2024-02-29 is day 19782.
        let t = SystemTime::from_unix_secs(19782 * 86400 + 3661);
        assert_eq!((t.year, t.month, t.day), (2024, 2, 29));
        assert_eq!((t.hour, t.minute, t.second), (1, 1, 1));
    }

    #[test]
    fn days_from_ymd_inverts_days_to_ymd() {
        for days in [0u64, 1, 31, 59, 365, 11_016, 19_416, 19_782, 20_745] {
            let (y, m, d) = days_to_ymd(days);
            assert_eq!(days_from_ymd(y, m, d), days as i64, "day {days}");
        }
    }

    #[test]
    fn days_to_ymd_leap_year_feb_29() {
        assert_eq!(days_to_ymd(19782), (2024, 2, 29));
    }

    #[test]
    fn days_to_ymd_december_31() {
        assert_eq!(days_to_ymd(364), (1970, 12, 31));
    }

    #[test]
    fn is_leap_rules() {
        assert!(is_leap(2024));
        assert!(!is_leap(2023));
        assert!(!is_leap(1900));
        assert!(is_leap(2000));
    }

    #[test]
    fn fixed_time_is_constant() {
        let clock = FixedTime::new(sample(), 3725);
        assert_eq!(clock.now().unwrap(), sample());
        assert_eq!(clock.now().unwrap(), clock.now().unwrap());
        assert_eq!(clock.uptime_secs().unwrap(), 3725);
    }

    #[test]
    fn desktop_time_is_after_2020() {
        let clock = DesktopTime::new();
        assert!(clock.now().unwrap().year >= 2020);
        assert!(clock.uptime_secs().unwrap() < 60);
    }
}
