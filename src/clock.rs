//! Software wall clock advanced by a 1 Hz alarm.

/// Calendar date and time of day, one-second resolution.
#[cfg_attr(all(feature = "defmt", not(test)), derive(defmt::Format))]
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct WallTime {
    pub year: u16,
    /// 1-12
    pub month: u8,
    /// 1-31
    pub day: u8,
    pub hours: u8,
    pub mins: u8,
    pub secs: u8,
}

#[cfg_attr(all(feature = "defmt", not(test)), derive(defmt::Format))]
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub fn short_name(self) -> &'static str {
        match self {
            Self::Sunday => "Sun",
            Self::Monday => "Mon",
            Self::Tuesday => "Tue",
            Self::Wednesday => "Wed",
            Self::Thursday => "Thu",
            Self::Friday => "Fri",
            Self::Saturday => "Sat",
        }
    }
}

impl WallTime {
    pub const fn is_leap_year(year: u16) -> bool {
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    }

    pub const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    /// Day of the week (Sakamoto's method, Gregorian calendar).
    pub fn weekday(&self) -> Weekday {
        const OFFSETS: [i32; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
        let month = self.month.clamp(1, 12);
        let year = i32::from(self.year) - i32::from(month < 3);
        let index = (year + year.div_euclid(4) - year.div_euclid(100)
            + year.div_euclid(400)
            + OFFSETS[month as usize - 1]
            + i32::from(self.day))
        .rem_euclid(7);
        match index {
            0 => Weekday::Sunday,
            1 => Weekday::Monday,
            2 => Weekday::Tuesday,
            3 => Weekday::Wednesday,
            4 => Weekday::Thursday,
            5 => Weekday::Friday,
            _ => Weekday::Saturday,
        }
    }
}

/// Shared state for the clock
pub struct WallClock {
    now: WallTime,
}

impl WallClock {
    pub fn new(start: WallTime) -> Self {
        Self { now: start }
    }

    pub fn now(&self) -> WallTime {
        self.now
    }

    /// Increments the second. Returns true if a new minute began.
    pub fn tick(&mut self) -> bool {
        self.now.secs += 1;
        if self.now.secs >= 60 {
            self.now.secs = 0;
            self.add_minute();
            return true;
        }
        false
    }

    /// Increments the minute. Handles rollover to hours and days.
    pub fn add_minute(&mut self) {
        self.now.mins += 1;
        if self.now.mins >= 60 {
            self.now.mins = 0;
            self.now.hours += 1;
            if self.now.hours >= 24 {
                self.now.hours = 0;
                self.add_day();
            }
        }
    }

    fn add_day(&mut self) {
        self.now.day += 1;
        if self.now.day > WallTime::days_in_month(self.now.year, self.now.month) {
            self.now.day = 1;
            self.now.month += 1;
            if self.now.month > 12 {
                self.now.month = 1;
                self.now.year += 1;
            }
        }
    }
}
