//! Coalescing deserializers for upstream telemetry.
//!
//! Telemetry arrives from several independent sources and field types drift:
//! numbers show up as strings, nulls, or garbage. None of that is an error here;
//! every numeric field degrades to zero (or to "absent" for credits).

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

impl Loose {
    fn as_f64(&self) -> Option<f64> {
        let v = match self {
            Self::Unsigned(v) => *v as f64,
            Self::Signed(v) => *v as f64,
            Self::Float(v) => *v,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
            Self::Other(_) => return None,
        };
        v.is_finite().then_some(v)
    }
}

/// Non-negative integer; negative, non-finite and unparseable values become 0.
pub(crate) fn non_negative<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    let value = match Option::<Loose>::deserialize(d)? {
        Some(Loose::Unsigned(v)) => v,
        Some(other) => other.as_f64().filter(|v| *v > 0.0).map_or(0, |v| v as u64),
        None => 0,
    };
    Ok(value)
}

/// Credits: `null`, missing and unparseable values are absent, not zero.
pub(crate) fn credits<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    let value = match Option::<Loose>::deserialize(d)? {
        Some(Loose::Unsigned(v)) => Some(i64::try_from(v).unwrap_or(i64::MAX)),
        Some(Loose::Signed(v)) => Some(v),
        Some(other) => other.as_f64().map(|v| v as i64),
        None => None,
    };
    Ok(value)
}

/// Identity key, kept exactly as given; blank strings count as no identity.
pub(crate) fn identity<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = match Option::<Loose>::deserialize(d)? {
        Some(Loose::Text(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    };
    Ok(value)
}

/// Free-form text; non-string values are dropped.
pub(crate) fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = match Option::<Loose>::deserialize(d)? {
        Some(Loose::Text(s)) => Some(s),
        Some(Loose::Unsigned(v)) => Some(v.to_string()),
        Some(Loose::Float(v)) => Some(v.to_string()),
        _ => None,
    };
    Ok(value)
}

/// Boolean flag; anything other than `true` (or `"true"`) is false.
pub(crate) fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LooseFlag {
        Bool(bool),
        Text(String),
        Other(IgnoredAny),
    }

    let value = match Option::<LooseFlag>::deserialize(d)? {
        Some(LooseFlag::Bool(b)) => b,
        Some(LooseFlag::Text(s)) => s.trim().eq_ignore_ascii_case("true"),
        Some(LooseFlag::Other(_)) | None => false,
    };
    Ok(value)
}
