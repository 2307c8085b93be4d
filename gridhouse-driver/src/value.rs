//! Wire representation of values and rows.

use std::fmt;

use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

use crate::types::TypeTag;

/// A raw value received from the execution service, tagged with its
/// logical type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Varchar(String),
    Boolean(bool),
    TinyInt(i8),
    SmallInt(i16),
    Integer(i32),
    BigInt(i64),
    /// Arbitrary precision; the scale is whatever the payload carried.
    Decimal(BigDecimal),
    Real(f32),
    Double(f64),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    TimestampWithTz(DateTime<FixedOffset>),
    Object(serde_json::Value),
    Json(serde_json::Value),
}

impl Value {
    pub fn tag(&self) -> TypeTag {
        match self {
            Value::Null => TypeTag::Null,
            Value::Varchar(_) => TypeTag::Varchar,
            Value::Boolean(_) => TypeTag::Boolean,
            Value::TinyInt(_) => TypeTag::TinyInt,
            Value::SmallInt(_) => TypeTag::SmallInt,
            Value::Integer(_) => TypeTag::Integer,
            Value::BigInt(_) => TypeTag::BigInt,
            Value::Decimal(_) => TypeTag::Decimal,
            Value::Real(_) => TypeTag::Real,
            Value::Double(_) => TypeTag::Double,
            Value::Date(_) => TypeTag::Date,
            Value::Time(_) => TypeTag::Time,
            Value::Timestamp(_) => TypeTag::Timestamp,
            Value::TimestampWithTz(_) => TypeTag::TimestampWithTz,
            Value::Object(_) => TypeTag::Object,
            Value::Json(_) => TypeTag::Json,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Display form of a value, as rendered to clients.
///
/// This is formatting, not serialization: numerics carry no separators,
/// booleans render lowercase, temporals render as ISO-8601.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Varchar(v) => f.write_str(v),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::TinyInt(v) => write!(f, "{v}"),
            Value::SmallInt(v) => write!(f, "{v}"),
            Value::Integer(v) => write!(f, "{v}"),
            Value::BigInt(v) => write!(f, "{v}"),
            Value::Decimal(v) => {
                // bigdecimal renders zero without its scale; the payload
                // scale must survive the round-trip through text
                let (_, exponent) = v.as_bigint_and_exponent();
                if v.is_zero() && exponent > 0 {
                    write!(f, "0.{}", "0".repeat(exponent as usize))
                } else {
                    write!(f, "{v}")
                }
            }
            Value::Real(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
            Value::Time(v) => write!(f, "{}", v.format("%H:%M:%S%.f")),
            Value::Timestamp(v) => write!(f, "{}", v.format("%Y-%m-%dT%H:%M:%S%.f")),
            Value::TimestampWithTz(v) => f.write_str(&v.to_rfc3339()),
            Value::Object(v) => write!(f, "{v}"),
            Value::Json(v) => write!(f, "{v}"),
        }
    }
}

/// One row of a result. Values are ordered to match the cursor metadata and
/// never mutated after the stream hands the row over.
#[derive(Debug, Clone, PartialEq)]
pub struct Row(Vec<Value>);

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Row(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value at a zero-based position.
    pub fn get(&self, position: usize) -> Option<&Value> {
        self.0.get(position)
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Row(values)
    }
}
