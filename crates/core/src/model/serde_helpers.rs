//! Serde helpers for the loosely typed wire format
//!
//! The seating API sends integers either as JSON numbers or as numeric
//! strings (aggregates such as `totalSeatsBooked` come back as `"8"`), and
//! sometimes as `null`. These helpers accept all three shapes.

use serde::de::{self, Deserializer, Visitor};
use std::fmt;

struct IntegerVisitor;

impl<'de> Visitor<'de> for IntegerVisitor {
    type Value = Option<i64>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer, a numeric string or null")
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Some(value))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        i64::try_from(value)
            .map(Some)
            .map_err(|_| de::Error::custom(format!("integer out of range: {}", value)))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            Ok(Some(value as i64))
        } else {
            Err(de::Error::custom(format!("not an integer: {}", value)))
        }
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .parse::<i64>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid integer: {}", value)))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(IntegerVisitor)
    }
}

/// Required integer id
pub fn id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer
        .deserialize_any(IntegerVisitor)?
        .ok_or_else(|| de::Error::custom("missing integer id"))
}

/// Optional integer id, null and empty strings map to None
pub fn option_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(IntegerVisitor)
}

/// Required non-negative count
pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = deserializer
        .deserialize_any(IntegerVisitor)?
        .ok_or_else(|| de::Error::custom("missing count"))?;
    u32::try_from(value).map_err(|_| de::Error::custom(format!("invalid count: {}", value)))
}

/// Count where null means zero and negative values clamp to zero
pub fn count_or_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = deserializer.deserialize_any(IntegerVisitor)?.unwrap_or(0);
    Ok(u32::try_from(value.max(0)).unwrap_or(u32::MAX))
}
