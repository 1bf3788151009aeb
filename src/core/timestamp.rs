//! Purpose: RFC 3339 timestamp used by every `*_at` attribute.
//! Exports: `Timestamp`.
//! Role: Wire wrapper around `time::OffsetDateTime`.
//! Invariants: Serialization round-trips through RFC 3339 text.
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    pub fn new(inner: OffsetDateTime) -> Self {
        Self(inner)
    }

    pub fn as_offset_date_time(&self) -> OffsetDateTime {
        self.0
    }

    /// RFC 3339 rendering; `None` only for years outside 0..=9999.
    pub fn to_rfc3339(&self) -> Option<String> {
        self.0.format(&Rfc3339).ok()
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(inner: OffsetDateTime) -> Self {
        Self(inner)
    }
}

impl FromStr for Timestamp {
    type Err = time::error::Parse;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        OffsetDateTime::parse(raw.trim(), &Rfc3339).map(Self)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_rfc3339() {
            Some(text) => f.write_str(&text),
            None => write!(f, "{}", self.0),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let text = self
            .0
            .format(&Rfc3339)
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&text)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TimestampVisitor;

        impl Visitor<'_> for TimestampVisitor {
            type Value = Timestamp;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an RFC 3339 timestamp string")
            }

            fn visit_str<E: de::Error>(self, raw: &str) -> Result<Timestamp, E> {
                raw.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(TimestampVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::Timestamp;
    use time::macros::datetime;

    #[test]
    fn parses_millisecond_utc_timestamps() {
        let ts: Timestamp = serde_json::from_str(r#""2016-02-02T04:05:06.000Z""#).expect("ts");
        assert_eq!(
            ts.as_offset_date_time(),
            datetime!(2016-02-02 04:05:06 UTC)
        );
    }

    #[test]
    fn serializes_as_rfc3339() {
        let ts = Timestamp::new(datetime!(2017-01-01 08:30:00 UTC));
        assert_eq!(
            serde_json::to_string(&ts).expect("json"),
            r#""2017-01-01T08:30:00Z""#
        );
    }

    #[test]
    fn rejects_non_timestamp_text() {
        assert!(serde_json::from_str::<Timestamp>(r#""yesterday""#).is_err());
        assert!(serde_json::from_str::<Timestamp>("42").is_err());
    }
}
