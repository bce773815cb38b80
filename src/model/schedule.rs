use crate::model::error::input::InputError;
use crate::utils::validator;
use chrono::{NaiveDate, NaiveTime, Weekday};
use std::fmt::{self, Display, Formatter};

pub const TIME_FORMAT: &str = "%H:%M";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleKind {
    Daily,
    Weekly,
    Monthly,
    AtLogon,
    OneTime,
}

impl ScheduleKind {
    pub const ALL: [ScheduleKind; 5] = [
        ScheduleKind::Daily,
        ScheduleKind::Weekly,
        ScheduleKind::Monthly,
        ScheduleKind::AtLogon,
        ScheduleKind::OneTime,
    ];
}

impl Display for ScheduleKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScheduleKind::Daily => "Daily",
            ScheduleKind::Weekly => "Weekly",
            ScheduleKind::Monthly => "Monthly",
            ScheduleKind::AtLogon => "At logon",
            ScheduleKind::OneTime => "One time",
        };
        f.write_str(label)
    }
}

/// Day of week as the scheduler spells it (`MON` .. `SUN`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayOfWeek(pub Weekday);

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek(Weekday::Mon),
        DayOfWeek(Weekday::Tue),
        DayOfWeek(Weekday::Wed),
        DayOfWeek(Weekday::Thu),
        DayOfWeek(Weekday::Fri),
        DayOfWeek(Weekday::Sat),
        DayOfWeek(Weekday::Sun),
    ];

    pub fn code(&self) -> &'static str {
        match self.0 {
            Weekday::Mon => "MON",
            Weekday::Tue => "TUE",
            Weekday::Wed => "WED",
            Weekday::Thu => "THU",
            Weekday::Fri => "FRI",
            Weekday::Sat => "SAT",
            Weekday::Sun => "SUN",
        }
    }
}

impl Display for DayOfWeek {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// 1 to 31. Whether the day exists in a given month is left to the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DayOfMonth(u8);

impl DayOfMonth {
    pub fn new(day: u8) -> Option<Self> {
        (1..=31).contains(&day).then_some(Self(day))
    }
}

impl Display for DayOfMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    Daily { at: NaiveTime },
    Weekly { day: DayOfWeek, at: NaiveTime },
    Monthly { day: DayOfMonth, at: NaiveTime },
    AtLogon,
    OneTime { date: NaiveDate, at: NaiveTime },
}

/// Operator answers for a schedule, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSchedule {
    pub day_of_week: Option<DayOfWeek>,
    pub day_of_month: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

impl Schedule {
    pub fn build(kind: ScheduleKind, raw: &RawSchedule) -> Result<Self, InputError> {
        let schedule = match kind {
            ScheduleKind::Daily => Schedule::Daily {
                at: Self::time_field(raw)?,
            },
            ScheduleKind::Weekly => Schedule::Weekly {
                day: raw
                    .day_of_week
                    .ok_or_else(|| InputError::MissingField("day of week"))?,
                at: Self::time_field(raw)?,
            },
            ScheduleKind::Monthly => {
                let value = raw
                    .day_of_month
                    .as_deref()
                    .ok_or_else(|| InputError::MissingField("day of month"))?;
                Schedule::Monthly {
                    day: validator::parse_day_of_month(value)
                        .ok_or_else(|| InputError::InvalidDayOfMonth(value))?,
                    at: Self::time_field(raw)?,
                }
            }
            ScheduleKind::AtLogon => Schedule::AtLogon,
            ScheduleKind::OneTime => {
                let value = raw
                    .date
                    .as_deref()
                    .ok_or_else(|| InputError::MissingField("date"))?;
                Schedule::OneTime {
                    date: validator::parse_date(value)
                        .ok_or_else(|| InputError::InvalidDate(value))?,
                    at: Self::time_field(raw)?,
                }
            }
        };
        Ok(schedule)
    }

    fn time_field(raw: &RawSchedule) -> Result<NaiveTime, InputError> {
        let value = raw
            .time
            .as_deref()
            .ok_or_else(|| InputError::MissingField("time"))?;
        validator::parse_time(value).ok_or_else(|| InputError::InvalidTime(value))
    }

    pub fn kind(&self) -> ScheduleKind {
        match self {
            Schedule::Daily { .. } => ScheduleKind::Daily,
            Schedule::Weekly { .. } => ScheduleKind::Weekly,
            Schedule::Monthly { .. } => ScheduleKind::Monthly,
            Schedule::AtLogon => ScheduleKind::AtLogon,
            Schedule::OneTime { .. } => ScheduleKind::OneTime,
        }
    }
}

impl Display for Schedule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Schedule::Daily { at } => write!(f, "daily at {}", at.format(TIME_FORMAT)),
            Schedule::Weekly { day, at } => {
                write!(f, "weekly on {day} at {}", at.format(TIME_FORMAT))
            }
            Schedule::Monthly { day, at } => {
                write!(f, "monthly on day {day} at {}", at.format(TIME_FORMAT))
            }
            Schedule::AtLogon => f.write_str("at logon"),
            Schedule::OneTime { date, at } => write!(
                f,
                "once on {} at {}",
                date.format(DATE_FORMAT),
                at.format(TIME_FORMAT)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn raw_with_time(value: &str) -> RawSchedule {
        RawSchedule {
            time: Some(value.to_string()),
            ..RawSchedule::default()
        }
    }

    #[test]
    fn weekly_friday_evening() {
        let raw = RawSchedule {
            day_of_week: Some(DayOfWeek(Weekday::Fri)),
            ..raw_with_time("18:30")
        };
        let schedule = Schedule::build(ScheduleKind::Weekly, &raw).unwrap();
        assert_eq!(
            schedule,
            Schedule::Weekly {
                day: DayOfWeek(Weekday::Fri),
                at: time(18, 30)
            }
        );
        assert_eq!(schedule.to_string(), "weekly on FRI at 18:30");
    }

    #[test]
    fn every_kind_builds_its_own_variant() {
        let raw = RawSchedule {
            day_of_week: Some(DayOfWeek(Weekday::Mon)),
            day_of_month: Some("15".to_string()),
            date: Some("2025-03-01".to_string()),
            time: Some("02:00".to_string()),
        };
        for kind in ScheduleKind::ALL {
            let schedule = Schedule::build(kind, &raw).unwrap();
            assert_eq!(schedule.kind(), kind);
            assert_eq!(Schedule::build(kind, &raw).unwrap(), schedule);
        }
    }

    #[test]
    fn at_logon_ignores_other_fields() {
        let schedule = Schedule::build(ScheduleKind::AtLogon, &RawSchedule::default()).unwrap();
        assert_eq!(schedule, Schedule::AtLogon);
    }

    #[test]
    fn missing_fields_are_named() {
        let error = Schedule::build(ScheduleKind::Weekly, &raw_with_time("10:00")).unwrap_err();
        assert_eq!(error, InputError::MissingField("day of week"));

        let error = Schedule::build(ScheduleKind::Daily, &RawSchedule::default()).unwrap_err();
        assert_eq!(error, InputError::MissingField("time"));
    }

    #[test]
    fn invalid_fields_are_rejected() {
        let error = Schedule::build(ScheduleKind::Daily, &raw_with_time("24:00")).unwrap_err();
        assert_eq!(error, InputError::InvalidTime("24:00"));

        let raw = RawSchedule {
            day_of_month: Some("32".to_string()),
            ..raw_with_time("08:00")
        };
        let error = Schedule::build(ScheduleKind::Monthly, &raw).unwrap_err();
        assert_eq!(error, InputError::InvalidDayOfMonth("32"));

        let raw = RawSchedule {
            date: Some("2023-02-29".to_string()),
            ..raw_with_time("08:00")
        };
        let error = Schedule::build(ScheduleKind::OneTime, &raw).unwrap_err();
        assert_eq!(error, InputError::InvalidDate("2023-02-29"));
    }

    #[test]
    fn monthly_accepts_day_without_calendar_check() {
        let raw = RawSchedule {
            day_of_month: Some("31".to_string()),
            ..raw_with_time("23:59")
        };
        let schedule = Schedule::build(ScheduleKind::Monthly, &raw).unwrap();
        assert_eq!(schedule.to_string(), "monthly on day 31 at 23:59");
    }
}
