use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Debug, Display},
    sync::OnceLock,
};
use time::{Date as TimeDate, format_description::FormatItem};

static FORMAT: OnceLock<Option<Vec<FormatItem<'static>>>> = OnceLock::new();

// Julian day number of 1970-01-01.
const EPOCH_JULIAN_DAY: i32 = 2_440_588;

///
/// Date
/// (days since 1970-01-01)
///
/// Always within the calendar range `-9999-01-01..=9999-12-31`, so every
/// value has exactly one ISO rendering.
///

#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Date(i32);

impl Date {
    pub const EPOCH: Self = Self(0);
    pub const MIN: Self = Self::from_time_date(TimeDate::MIN);
    pub const MAX: Self = Self::from_time_date(TimeDate::MAX);

    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Shift by a signed number of days, saturating at [`Self::MIN`] and
    /// [`Self::MAX`].
    #[must_use]
    pub const fn add_days(self, days: i32) -> Self {
        let shifted = self.0.saturating_add(days);

        if shifted < Self::MIN.0 {
            Self::MIN
        } else if shifted > Self::MAX.0 {
            Self::MAX
        } else {
            Self(shifted)
        }
    }

    /// Parse an ISO `YYYY-MM-DD` string into a `Date`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let format = FORMAT
            .get_or_init(|| time::format_description::parse("[year]-[month]-[day]").ok())
            .as_ref()?;

        TimeDate::parse(s.trim(), format)
            .ok()
            .map(Self::from_time_date)
    }

    const fn from_time_date(date: TimeDate) -> Self {
        Self(date.to_julian_day() - EPOCH_JULIAN_DAY)
    }

    fn to_time_date(self) -> TimeDate {
        TimeDate::from_julian_day(self.0 + EPOCH_JULIAN_DAY).unwrap_or(TimeDate::MIN)
    }
}

impl Debug for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Date({self})")
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.to_time_date();
        let month: u8 = d.month().into();

        write!(f, "{:04}-{:02}-{:02}", d.year(), month, d.day())
    }
}

impl From<Date> for Value {
    fn from(date: Date) -> Self {
        Self::Date(date)
    }
}

impl Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        Self::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {s}")))
    }
}

///
/// TESTS
///
