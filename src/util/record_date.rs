use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::text_utils::{format_date_time, parse_date_time};

/// Publication timestamp of a record. Deserialised leniently from the
/// formats `parse_date_time` understands, serialised as `YYYY-MM-DDTHH:MM:SS`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct RecordDate(pub NaiveDateTime);

impl<'de> Deserialize<'de> for RecordDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
    {
        use serde::de::Error;
        let value = String::deserialize(deserializer)?;
        RecordDate::from_str(&value).map_err(Error::custom)
    }
}

impl Serialize for RecordDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl FromStr for RecordDate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(parse_date_time(s)?))
    }
}

impl fmt::Display for RecordDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (date, time) = format_date_time(&self.0);
        write!(f, "{}T{}", date, time)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize)]
    struct Entry {
        date: RecordDate,
    }

    #[test]
    fn test_date_from_json() {
        let entry: Entry = serde_json::from_str(r#"{"date": "2024-04-22"}"#).unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 4, 22).unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(entry.date, RecordDate(expected));
    }

    #[test]
    fn test_invalid_date_from_json() {
        let entry = serde_json::from_str::<Entry>(r#"{"date": "next week"}"#);
        assert!(entry.is_err());
    }

    #[test]
    fn test_serialize() {
        let date = RecordDate::from_str("2023-05-01 08:30:00").unwrap();
        assert_eq!(serde_json::to_string(&date).unwrap(), r#""2023-05-01T08:30:00""#);
    }
}
