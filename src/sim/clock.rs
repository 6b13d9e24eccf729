use std::fmt;

/// Minutes in one simulated hour.
pub const MINUTES_PER_HOUR: u32 = 60;
/// Hours in one simulated day.
pub const HOURS_PER_DAY: u32 = 24;
/// Minutes in one simulated day.
pub const MINUTES_PER_DAY: usize = (MINUTES_PER_HOUR * HOURS_PER_DAY) as usize;
/// Longest horizon a scenario may ask for, in days.
pub const MAX_DAYS: usize = 366;
/// Every run starts at noon of day 0.
pub const START_HOUR: u32 = 12;

/// Short weekday names used to label simulated days.
pub const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// A point in simulated time with minute resolution.
///
/// # Examples
///
/// ```
/// use power_sim::sim::clock::SimTime;
///
/// let t = SimTime::new(0, 23, 59).advanced();
/// assert_eq!(t, SimTime::new(1, 0, 0));
/// assert_eq!(t.to_string(), "00:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimTime {
    /// Simulated day index, starting at 0.
    pub day: usize,
    /// Hour of day (0–23).
    pub hour: u32,
    /// Minute of hour (0–59).
    pub minute: u32,
}

impl SimTime {
    /// Noon of day 0.
    pub const START: Self = Self {
        day: 0,
        hour: START_HOUR,
        minute: 0,
    };

    pub fn new(day: usize, hour: u32, minute: u32) -> Self {
        Self { day, hour, minute }
    }

    /// Returns the time one minute later, rolling minute → hour → day.
    pub fn advanced(self) -> Self {
        let mut next = self;
        next.minute += 1;
        if next.minute == MINUTES_PER_HOUR {
            next.minute = 0;
            next.hour += 1;
        }
        if next.hour == HOURS_PER_DAY {
            next.hour = 0;
            next.day += 1;
        }
        next
    }

    /// Minutes since midnight of day 0, saturating at `usize::MAX`.
    pub fn absolute_minutes(self) -> usize {
        self.day
            .saturating_mul(MINUTES_PER_DAY)
            .saturating_add((self.hour * MINUTES_PER_HOUR + self.minute) as usize)
    }
}

/// Formats as `HH:MM`; the day is labeled separately.
impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Fixed simulation horizon: `days` labeled days, the last one ending at `end_hour`.
///
/// The horizon alone decides how many ticks a run takes; nothing observed
/// during the run can cut it short.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Horizon {
    /// Number of labeled days the run touches (must be > 0).
    pub days: usize,
    /// Hour at which the final day ends (the run stops at `end_hour:00`).
    pub end_hour: u32,
}

impl Default for Horizon {
    fn default() -> Self {
        Self {
            days: 5,
            end_hour: 18,
        }
    }
}

impl Horizon {
    pub fn new(days: usize, end_hour: u32) -> Self {
        Self { days, end_hour }
    }

    /// The time of the final tick.
    pub fn end(&self) -> SimTime {
        SimTime::new(self.days.saturating_sub(1), self.end_hour, 0)
    }

    /// Number of one-minute ticks from [`SimTime::START`] to [`Horizon::end`].
    ///
    /// Returns 0 if the end does not lie after the start.
    pub fn total_ticks(&self) -> usize {
        self.end()
            .absolute_minutes()
            .saturating_sub(SimTime::START.absolute_minutes())
    }
}

/// Returns the weekday label for a simulated day, counting from `first_day`
/// (an index into [`WEEKDAYS`]).
pub fn day_label(first_day: usize, day: usize) -> &'static str {
    let n = WEEKDAYS.len();
    WEEKDAYS[(first_day % n + day % n) % n]
}

/// Looks up the [`WEEKDAYS`] index of a label, case-insensitively.
pub fn weekday_index(label: &str) -> Option<usize> {
    WEEKDAYS.iter().position(|d| d.eq_ignore_ascii_case(label))
}
