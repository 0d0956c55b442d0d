//! Conversions into calendar library types.
//!
//! Zero dates, negative times and hours past 23 have no counterpart there and
//! are rejected with `BadUsageError`.

use super::{Date, Time, Timestamp};
use crate::error::Error;

fn unrepresentable(what: &str, value: impl std::fmt::Display, target: &str) -> Error {
    Error::BadUsageError(format!("Cannot convert MySQL {} '{}' to {}", what, value, target))
}

#[cfg(feature = "with-chrono")]
mod chrono_impl {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    impl TryFrom<Date> for NaiveDate {
        type Error = Error;

        fn try_from(v: Date) -> Result<Self, Self::Error> {
            NaiveDate::from_ymd_opt(v.year, v.month as u32, v.day as u32)
                .ok_or_else(|| unrepresentable("DATE", v, "chrono::NaiveDate"))
        }
    }

    impl TryFrom<Time> for NaiveTime {
        type Error = Error;

        fn try_from(v: Time) -> Result<Self, Self::Error> {
            if v.negative {
                return Err(unrepresentable("TIME", v, "chrono::NaiveTime"));
            }
            NaiveTime::from_hms_nano_opt(v.hours, v.minutes as u32, v.seconds as u32, v.nanos)
                .ok_or_else(|| unrepresentable("TIME", v, "chrono::NaiveTime"))
        }
    }

    impl TryFrom<Timestamp> for NaiveDateTime {
        type Error = Error;

        fn try_from(v: Timestamp) -> Result<Self, Self::Error> {
            let date = NaiveDate::try_from(v.date)?;
            let time = NaiveTime::try_from(v.time())?;
            Ok(NaiveDateTime::new(date, time))
        }
    }
}

#[cfg(feature = "with-time")]
mod time_impl {
    use super::*;

    impl TryFrom<Date> for time::Date {
        type Error = Error;

        fn try_from(v: Date) -> Result<Self, Self::Error> {
            let month = time::Month::try_from(v.month)
                .map_err(|_| unrepresentable("DATE", v, "time::Date"))?;
            time::Date::from_calendar_date(v.year, month, v.day)
                .map_err(|_| unrepresentable("DATE", v, "time::Date"))
        }
    }

    impl TryFrom<Time> for time::Time {
        type Error = Error;

        fn try_from(v: Time) -> Result<Self, Self::Error> {
            if v.negative || v.hours > 23 {
                return Err(unrepresentable("TIME", v, "time::Time"));
            }
            time::Time::from_hms_nano(v.hours as u8, v.minutes, v.seconds, v.nanos)
                .map_err(|_| unrepresentable("TIME", v, "time::Time"))
        }
    }

    impl TryFrom<Timestamp> for time::PrimitiveDateTime {
        type Error = Error;

        fn try_from(v: Timestamp) -> Result<Self, Self::Error> {
            let date = time::Date::try_from(v.date)?;
            let time = time::Time::try_from(v.time())?;
            Ok(time::PrimitiveDateTime::new(date, time))
        }
    }
}

#[cfg(test)]
mod tests {
    #[cfg(feature = "with-chrono")]
    #[test]
    fn chrono_conversions() {
        use super::*;
        use chrono::{NaiveDate, NaiveDateTime};

        let d = NaiveDate::try_from(Date::new(2024, 2, 29)).unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert!(NaiveDate::try_from(Date::new(0, 0, 0)).is_err());
        assert!(chrono::NaiveTime::try_from(Time::new(true, 1, 0, 0, 0)).is_err());

        let ts = Timestamp::new(Date::new(2024, 1, 2), 3, 4, 5, 6_000);
        let dt = NaiveDateTime::try_from(ts).unwrap();
        assert_eq!(dt.to_string(), "2024-01-02 03:04:05.000006");
    }

    #[cfg(feature = "with-time")]
    #[test]
    fn time_conversions() {
        use super::*;

        let d = time::Date::try_from(Date::new(2024, 12, 25)).unwrap();
        assert_eq!(d.year(), 2024);
        assert_eq!(d.day(), 25);
        assert!(time::Time::try_from(Time::new(false, 25, 0, 0, 0)).is_err());
    }
}
