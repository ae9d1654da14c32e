use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// A number as it arrives from the store or from a request body.
///
/// The store hands numbers back as decimal strings, so every numeric field
/// goes through here: exact values become `Integer`, anything else is kept
/// as `Float` and serialised as such.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericValue {
    Integer(i64),
    Float(f64),
}

impl NumericValue {
    pub fn from_f64(value: f64) -> Self {
        // `i64::MAX as f64` rounds up to 2^63, which is out of range
        if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
            NumericValue::Integer(value as i64)
        } else {
            NumericValue::Float(value)
        }
    }

    /// Parse a decimal string, returning `None` for anything non-numeric or non-finite.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw: &str = raw.trim();

        if let Ok(value) = raw.parse::<i64>() {
            return Some(NumericValue::Integer(value));
        }

        raw.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(NumericValue::from_f64)
    }

    /// Integer view of the value, truncating toward zero.
    pub fn as_i64(&self) -> i64 {
        match self {
            NumericValue::Integer(value) => *value,
            NumericValue::Float(value) => value.trunc() as i64,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        u64::try_from(self.as_i64()).ok()
    }

    pub fn is_integral(&self) -> bool {
        matches!(self, NumericValue::Integer(_))
    }
}

impl Display for NumericValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NumericValue::Integer(value) => write!(f, "{value}"),
            NumericValue::Float(value) => write!(f, "{value}"),
        }
    }
}

impl Serialize for NumericValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NumericValue::Integer(value) => serializer.serialize_i64(*value),
            NumericValue::Float(value) => serializer.serialize_f64(*value),
        }
    }
}

struct NumericVisitor;

impl<'de> Visitor<'de> for NumericVisitor {
    type Value = NumericValue;

    fn expecting(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<NumericValue, E> {
        Ok(NumericValue::Integer(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<NumericValue, E> {
        Ok(i64::try_from(value)
            .map(NumericValue::Integer)
            .unwrap_or(NumericValue::Float(value as f64)))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<NumericValue, E> {
        Ok(NumericValue::from_f64(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<NumericValue, E> {
        NumericValue::parse(value)
            .ok_or_else(|| E::invalid_value(de::Unexpected::Str(value), &self))
    }
}

impl<'de> Deserialize<'de> for NumericValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NumericVisitor)
    }
}

/// Deserialize any numeric representation into an `i64`.
pub fn coerce_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    NumericValue::deserialize(deserializer).map(|value| value.as_i64())
}

/// Deserialize any numeric representation into a non-negative integer.
pub fn coerce_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value: NumericValue = NumericValue::deserialize(deserializer)?;

    value
        .as_u64()
        .ok_or_else(|| de::Error::custom(format!("expected a non-negative integer, found {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_values_become_integers() {
        assert_eq!(Some(NumericValue::Integer(125)), NumericValue::parse("125"));
        assert_eq!(Some(NumericValue::Integer(90)), NumericValue::parse("90.0"));
        assert_eq!(NumericValue::Integer(3), NumericValue::from_f64(3.0));
    }

    #[test]
    fn fractional_values_stay_floating_point() {
        let value: NumericValue = NumericValue::parse("12.5").expect("Should parse");

        assert_eq!(NumericValue::Float(12.5), value);
        assert_eq!(12, value.as_i64());
        assert!(!value.is_integral());
        assert_eq!("12.5", serde_json::to_string(&value).unwrap());
    }

    #[test]
    fn rejects_non_numeric_input() {
        assert_eq!(None, NumericValue::parse("three minutes"));
        assert_eq!(None, NumericValue::parse("NaN"));
        assert!(serde_json::from_str::<NumericValue>("true").is_err());
    }

    #[test]
    fn deserializes_numbers_and_numeric_strings() {
        let from_number: NumericValue = serde_json::from_str("65").unwrap();
        let from_string: NumericValue = serde_json::from_str("\"65\"").unwrap();

        assert_eq!(from_number, from_string);
        assert_eq!("65", serde_json::to_string(&from_number).unwrap());
    }

    #[test]
    fn negative_values_have_no_unsigned_view() {
        assert_eq!(None, NumericValue::Integer(-1).as_u64());
        assert_eq!(Some(0), NumericValue::Float(0.4).as_u64());
    }
}
