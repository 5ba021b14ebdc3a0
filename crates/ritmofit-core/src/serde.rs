// Module name shadows the `serde` crate; use `::serde` for the external crate.
use ::serde::{Deserialize, Deserializer, Serializer};
use chrono::{DateTime, NaiveTime, SecondsFormat, Utc};

/// Serialize `DateTime<Utc>` as RFC 3339 with 3-digit fractional seconds.
pub fn to_rfc3339_ms<S>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Serialize a wall-clock time as `HH:MM`.
pub fn to_hh_mm<S>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&t.format("%H:%M").to_string())
}

/// Serialize an optional wall-clock time as `HH:MM` or `null`.
pub fn to_opt_hh_mm<S>(t: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match t {
        Some(t) => to_hh_mm(t, s),
        None => s.serialize_none(),
    }
}

/// Deserialize a wall-clock time from `HH:MM` or `HH:MM:SS`.
pub fn from_hh_mm<'de, D>(d: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(d)?;
    parse_hh_mm(&raw).ok_or_else(|| invalid_time::<D::Error>(&raw))
}

/// Optional variant of [`from_hh_mm`]; use with `#[serde(default)]`.
pub fn from_opt_hh_mm<'de, D>(d: D) -> Result<Option<NaiveTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(d)? {
        Some(raw) => parse_hh_mm(&raw)
            .map(Some)
            .ok_or_else(|| invalid_time::<D::Error>(&raw)),
        None => Ok(None),
    }
}

fn invalid_time<E: ::serde::de::Error>(raw: &str) -> E {
    E::custom(format!("invalid time: {raw}"))
}

fn parse_hh_mm(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

/// Deserialize a nullable field of a partial update: absent stays `None`
/// (with `#[serde(default)]`), `null` becomes `Some(None)`.
pub fn double_option<'de, D, T>(d: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(d).map(Some)
}
