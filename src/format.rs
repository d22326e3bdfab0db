//! Rendering of time, date and step count into caller-owned buffers.

use core::fmt;

use crate::clock::WallTime;

/// Buffer sizes large enough for every string the formatter produces.
pub const TIME_LEN: usize = 8;
pub const DATE_LEN: usize = 16;
pub const STEPS_LEN: usize = 24;

const MONTHS: [&str; 12] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

#[cfg_attr(all(feature = "defmt", not(test)), derive(defmt::Format))]
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub enum HourFormat {
    /// `02:07` for 14:07.
    Twelve,
    #[default]
    TwentyFour,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Formatter {
    hour_format: HourFormat,
}

impl Formatter {
    pub fn new(hour_format: HourFormat) -> Self {
        Self { hour_format }
    }

    pub fn hour_format(&self) -> HourFormat {
        self.hour_format
    }

    /// `HH:MM`, zero padded in both hour formats.
    pub fn format_time<'b>(&self, now: &WallTime, buf: &'b mut [u8]) -> Result<&'b str, fmt::Error> {
        let hours = match self.hour_format {
            HourFormat::TwentyFour => now.hours,
            HourFormat::Twelve => match now.hours % 12 {
                0 => 12,
                h => h,
            },
        };
        format_no_std::show(buf, format_args!("{:02}:{:02}", hours, now.mins))
    }

    /// `Mon 01 Jan`.
    pub fn format_date<'b>(&self, now: &WallTime, buf: &'b mut [u8]) -> Result<&'b str, fmt::Error> {
        let month = MONTHS.get(now.month.wrapping_sub(1) as usize).ok_or(fmt::Error)?;
        format_no_std::show(
            buf,
            format_args!("{} {:02} {}", now.weekday().short_name(), now.day, month),
        )
    }

    /// `1 step`, otherwise `N steps` (including zero and negative counts).
    pub fn format_step_count<'b>(&self, steps: i32, buf: &'b mut [u8]) -> Result<&'b str, fmt::Error> {
        let unit = if steps == 1 { "step" } else { "steps" };
        format_no_std::show(buf, format_args!("{} {}", steps, unit))
    }
}
