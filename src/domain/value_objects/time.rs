//! Serde support for chrono durations
//!
//! `chrono::Duration` carries no serde impls of its own; the wire format here
//! is whole seconds, which is all the precision countdowns and duration
//! estimates need.

/// Serialize a `chrono::Duration` field as a number of seconds.
pub mod duration_seconds {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(duration.num_seconds())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let seconds = i64::deserialize(deserializer)?;
        Duration::try_seconds(seconds)
            .ok_or_else(|| serde::de::Error::custom(format!("duration out of range: {seconds}s")))
    }
}

/// Serialize an `Option<chrono::Duration>` field as a number of seconds.
pub mod duration_seconds_opt {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => serializer.serialize_i64(d.num_seconds()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<i64>::deserialize(deserializer)?
            .map(|seconds| {
                Duration::try_seconds(seconds).ok_or_else(|| {
                    serde::de::Error::custom(format!("duration out of range: {seconds}s"))
                })
            })
            .transpose()
    }
}
