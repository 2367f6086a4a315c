// Taskbar clock face

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;

#[derive(Clone, Serialize, Debug, PartialEq, Eq)]
pub struct ClockFace {
    /// 12-hour time, e.g. "3:07 PM"
    pub time: String,
    /// Numeric date, e.g. "10/17/2026"
    pub date: String,
}

impl ClockFace {
    pub fn at<Tz: TimeZone>(moment: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            time: moment.format("%-I:%M %p").to_string(),
            date: moment.format("%-m/%-d/%Y").to_string(),
        }
    }

    pub fn now() -> Self {
        Self::at(&Local::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn afternoon_uses_twelve_hour_clock() {
        let moment = Utc.with_ymd_and_hms(2026, 10, 7, 15, 7, 42).unwrap();
        assert_eq!(
            ClockFace::at(&moment),
            ClockFace {
                time: "3:07 PM".to_string(),
                date: "10/7/2026".to_string(),
            }
        );
    }

    #[test]
    fn midnight_is_twelve_am_in_local_offset() {
        let offset = FixedOffset::east_opt(5 * 3600).unwrap();
        let moment = offset.with_ymd_and_hms(2026, 1, 2, 0, 30, 0).unwrap();
        let face = ClockFace::at(&moment);
        assert_eq!(face.time, "12:30 AM");
        assert_eq!(face.date, "1/2/2026");
    }
}
