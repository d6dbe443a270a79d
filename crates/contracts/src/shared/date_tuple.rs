//! Календарная дата в формате бэкенда `[year, month, day]`
//!
//! Бэкенд отдаёт все даты массивом из трёх чисел (месяц с единицы), а формы
//! работают со строкой ISO `YYYY-MM-DD`. Преобразование без часовых поясов,
//! поэтому сдвигов на день или месяц не бывает.

use chrono::{Datelike, NaiveDate};
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Ошибка разбора даты
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateTupleError {
    #[error("invalid calendar date {year}-{month}-{day}")]
    OutOfRange { year: i32, month: u32, day: u32 },

    #[error("expected a date in YYYY-MM-DD form, got '{0}'")]
    Format(String),
}

const YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTuple(NaiveDate);

impl DateTuple {
    /// Years outside `0..=9999` have no `YYYY-MM-DD` form and are rejected
    pub fn from_parts(year: i32, month: u32, day: u32) -> Result<Self, DateTupleError> {
        Some(year)
            .filter(|y| YEARS.contains(y))
            .and_then(|y| NaiveDate::from_ymd_opt(y, month, day))
            .map(Self)
            .ok_or(DateTupleError::OutOfRange { year, month, day })
    }

    /// Parse the `YYYY-MM-DD` value of a date input.
    ///
    /// Every component must be present and numeric; out-of-range days are
    /// rejected instead of being rolled over into the next month.
    pub fn parse_iso(value: &str) -> Result<Self, DateTupleError> {
        let trimmed = value.trim();
        let mut parts = trimmed.splitn(3, '-');
        let (Some(y), Some(m), Some(d)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(DateTupleError::Format(value.to_string()));
        };
        let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
        if !digits(y) || !digits(m) || !digits(d) {
            return Err(DateTupleError::Format(value.to_string()));
        }
        let parse_err = |_| DateTupleError::Format(value.to_string());
        let year = y.parse::<i32>().map_err(parse_err)?;
        let month = m.parse::<u32>().map_err(parse_err)?;
        let day = d.parse::<u32>().map_err(parse_err)?;
        Self::from_parts(year, month, day)
    }

    pub fn to_iso_string(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }

    pub fn parts(&self) -> [i64; 3] {
        [self.year() as i64, self.month() as i64, self.day() as i64]
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl TryFrom<NaiveDate> for DateTuple {
    type Error = DateTupleError;

    fn try_from(value: NaiveDate) -> Result<Self, Self::Error> {
        Self::from_parts(value.year(), value.month(), value.day())
    }
}

impl FromStr for DateTuple {
    type Err = DateTupleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_iso(s)
    }
}

impl fmt::Display for DateTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

impl Serialize for DateTuple {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(3)?;
        tuple.serialize_element(&self.year())?;
        tuple.serialize_element(&self.month())?;
        tuple.serialize_element(&self.day())?;
        tuple.end()
    }
}

struct DateTupleVisitor;

impl<'de> Visitor<'de> for DateTupleVisitor {
    type Value = DateTuple;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a [year, month, day] array or a YYYY-MM-DD string")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let year: i32 = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let month: u32 = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;
        let day: u32 = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(2, &self))?;
        if seq.next_element::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(4, &self));
        }
        DateTuple::from_parts(year, month, day).map_err(de::Error::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        DateTuple::parse_iso(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for DateTuple {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DateTupleVisitor)
    }
}

/// Сериализация даты строкой ISO для эндпоинтов, которые ждут `"YYYY-MM-DD"`.
/// Чтение по-прежнему принимает оба формата.
pub mod as_iso {
    use super::DateTuple;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTuple, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.to_iso_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTuple, D::Error> {
        DateTuple::deserialize(deserializer)
    }
}
