//! Conversion of raw wire values into client-requested representations.
//!
//! One [FromSqlValue] impl per target representation, so the source tag ×
//! target matrix lives in a closed set of `match` tables instead of runtime
//! type inspection chains. Narrowing and float-to-integral conversions
//! truncate toward zero; anything out of range or semantically impossible
//! fails with a conversion error carrying the value's display form.

use std::str::FromStr;

use bigdecimal::{BigDecimal, FromPrimitive, ToPrimitive};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

use crate::errors::DriverError;
use crate::value::Value;

fn cannot_convert(value: &Value, target: &'static str) -> DriverError {
    DriverError::Conversion {
        value: value.to_string(),
        target,
    }
}

/// A representation that a raw value can be coerced into.
pub trait FromSqlValue: Sized {
    /// Name of the target representation, used in conversion errors.
    const TARGET: &'static str;

    /// Convert a non-null wire value into this representation.
    fn from_sql(value: &Value) -> Result<Self, DriverError>;
}

/// Zero value substituted for SQL NULL by the non-optional getters.
/// Representations without a meaningful zero (temporals, JSON) are read
/// through the optional getters instead.
pub trait NullDefault: FromSqlValue {
    fn null_default() -> Self;
}

impl FromSqlValue for bool {
    const TARGET: &'static str = "BOOLEAN";

    fn from_sql(value: &Value) -> Result<Self, DriverError> {
        match value {
            Value::Boolean(v) => Ok(*v),
            Value::Varchar(s) if s.trim().eq_ignore_ascii_case("true") => Ok(true),
            Value::Varchar(s) if s.trim().eq_ignore_ascii_case("false") => Ok(false),
            _ => Err(cannot_convert(value, Self::TARGET)),
        }
    }
}

impl NullDefault for bool {
    fn null_default() -> Self {
        false
    }
}

fn integral(value: &Value, target: &'static str) -> Result<i64, DriverError> {
    match value {
        Value::TinyInt(v) => Ok(*v as i64),
        Value::SmallInt(v) => Ok(*v as i64),
        Value::Integer(v) => Ok(*v as i64),
        Value::BigInt(v) => Ok(*v),
        Value::Decimal(v) => v.to_i64().ok_or_else(|| cannot_convert(value, target)),
        Value::Real(v) => float_to_integral(*v as f64, value, target),
        Value::Double(v) => float_to_integral(*v, value, target),
        Value::Varchar(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| cannot_convert(value, target)),
        _ => Err(cannot_convert(value, target)),
    }
}

fn float_to_integral(v: f64, value: &Value, target: &'static str) -> Result<i64, DriverError> {
    if !v.is_finite() {
        return Err(cannot_convert(value, target));
    }
    let truncated = v.trunc();
    // i64::MAX as f64 rounds up to 2^63, which does not fit
    if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return Err(cannot_convert(value, target));
    }
    Ok(truncated as i64)
}

macro_rules! impl_integral {
    ($($native:ty => $name:literal,)+) => {
        $(
            impl FromSqlValue for $native {
                const TARGET: &'static str = $name;

                fn from_sql(value: &Value) -> Result<Self, DriverError> {
                    let wide = integral(value, Self::TARGET)?;
                    <$native>::try_from(wide).map_err(|_| cannot_convert(value, Self::TARGET))
                }
            }

            impl NullDefault for $native {
                fn null_default() -> Self {
                    0
                }
            }
        )+
    };
}

impl_integral!(
    i8 => "TINYINT",
    i16 => "SMALLINT",
    i32 => "INTEGER",
    i64 => "BIGINT",
);

fn floating(value: &Value, target: &'static str) -> Result<f64, DriverError> {
    match value {
        Value::TinyInt(v) => Ok(*v as f64),
        Value::SmallInt(v) => Ok(*v as f64),
        Value::Integer(v) => Ok(*v as f64),
        Value::BigInt(v) => Ok(*v as f64),
        Value::Decimal(v) => v.to_f64().ok_or_else(|| cannot_convert(value, target)),
        Value::Real(v) => Ok(*v as f64),
        Value::Double(v) => Ok(*v),
        Value::Varchar(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| cannot_convert(value, target)),
        _ => Err(cannot_convert(value, target)),
    }
}

impl FromSqlValue for f64 {
    const TARGET: &'static str = "DOUBLE";

    fn from_sql(value: &Value) -> Result<Self, DriverError> {
        floating(value, Self::TARGET)
    }
}

impl NullDefault for f64 {
    fn null_default() -> Self {
        0.0
    }
}

impl FromSqlValue for f32 {
    const TARGET: &'static str = "REAL";

    fn from_sql(value: &Value) -> Result<Self, DriverError> {
        let wide = floating(value, Self::TARGET)?;
        if wide.is_finite() && wide.abs() > f32::MAX as f64 {
            return Err(cannot_convert(value, Self::TARGET));
        }
        Ok(wide as f32)
    }
}

impl NullDefault for f32 {
    fn null_default() -> Self {
        0.0
    }
}

impl FromSqlValue for String {
    const TARGET: &'static str = "VARCHAR";

    fn from_sql(value: &Value) -> Result<Self, DriverError> {
        match value {
            Value::Null => Err(cannot_convert(value, Self::TARGET)),
            _ => Ok(value.to_string()),
        }
    }
}

impl NullDefault for String {
    fn null_default() -> Self {
        String::new()
    }
}

impl FromSqlValue for BigDecimal {
    const TARGET: &'static str = "DECIMAL";

    fn from_sql(value: &Value) -> Result<Self, DriverError> {
        match value {
            Value::Decimal(v) => Ok(v.clone()),
            Value::TinyInt(v) => Ok(BigDecimal::from(*v)),
            Value::SmallInt(v) => Ok(BigDecimal::from(*v)),
            Value::Integer(v) => Ok(BigDecimal::from(*v)),
            Value::BigInt(v) => Ok(BigDecimal::from(*v)),
            Value::Real(v) => {
                BigDecimal::from_f32(*v).ok_or_else(|| cannot_convert(value, Self::TARGET))
            }
            Value::Double(v) => {
                BigDecimal::from_f64(*v).ok_or_else(|| cannot_convert(value, Self::TARGET))
            }
            Value::Varchar(s) => BigDecimal::from_str(s.trim())
                .map_err(|_| cannot_convert(value, Self::TARGET)),
            _ => Err(cannot_convert(value, Self::TARGET)),
        }
    }
}

impl NullDefault for BigDecimal {
    fn null_default() -> Self {
        BigDecimal::from(0)
    }
}

impl FromSqlValue for NaiveDate {
    const TARGET: &'static str = "DATE";

    fn from_sql(value: &Value) -> Result<Self, DriverError> {
        match value {
            Value::Date(v) => Ok(*v),
            Value::Timestamp(v) => Ok(v.date()),
            // timezone-bearing sources normalize to the instant first
            Value::TimestampWithTz(v) => Ok(v.naive_utc().date()),
            Value::Varchar(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .map_err(|_| cannot_convert(value, Self::TARGET)),
            _ => Err(cannot_convert(value, Self::TARGET)),
        }
    }
}

impl FromSqlValue for NaiveTime {
    const TARGET: &'static str = "TIME";

    fn from_sql(value: &Value) -> Result<Self, DriverError> {
        match value {
            Value::Time(v) => Ok(*v),
            Value::Timestamp(v) => Ok(v.time()),
            Value::TimestampWithTz(v) => Ok(v.naive_utc().time()),
            Value::Varchar(s) => NaiveTime::parse_from_str(s.trim(), "%H:%M:%S%.f")
                .map_err(|_| cannot_convert(value, Self::TARGET)),
            _ => Err(cannot_convert(value, Self::TARGET)),
        }
    }
}

impl FromSqlValue for NaiveDateTime {
    const TARGET: &'static str = "TIMESTAMP";

    fn from_sql(value: &Value) -> Result<Self, DriverError> {
        match value {
            Value::Timestamp(v) => Ok(*v),
            Value::Date(v) => Ok(v.and_time(NaiveTime::MIN)),
            Value::TimestampWithTz(v) => Ok(v.naive_utc()),
            Value::Varchar(s) => NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%dT%H:%M:%S%.f")
                .map_err(|_| cannot_convert(value, Self::TARGET)),
            _ => Err(cannot_convert(value, Self::TARGET)),
        }
    }
}

impl FromSqlValue for DateTime<FixedOffset> {
    const TARGET: &'static str = "TIMESTAMP WITH TIME ZONE";

    fn from_sql(value: &Value) -> Result<Self, DriverError> {
        match value {
            Value::TimestampWithTz(v) => Ok(*v),
            // plain timestamps are taken as UTC instants
            Value::Timestamp(v) => Ok(v.and_utc().fixed_offset()),
            Value::Date(v) => Ok(v.and_time(NaiveTime::MIN).and_utc().fixed_offset()),
            Value::Varchar(s) => DateTime::parse_from_rfc3339(s.trim())
                .map_err(|_| cannot_convert(value, Self::TARGET)),
            _ => Err(cannot_convert(value, Self::TARGET)),
        }
    }
}

impl FromSqlValue for serde_json::Value {
    const TARGET: &'static str = "JSON";

    fn from_sql(value: &Value) -> Result<Self, DriverError> {
        match value {
            Value::Json(v) | Value::Object(v) => Ok(v.clone()),
            Value::Varchar(s) => {
                serde_json::from_str(s).map_err(|_| cannot_convert(value, Self::TARGET))
            }
            _ => Err(cannot_convert(value, Self::TARGET)),
        }
    }
}

/// Raw access: hands back the wire value unchanged.
impl FromSqlValue for Value {
    const TARGET: &'static str = "OBJECT";

    fn from_sql(value: &Value) -> Result<Self, DriverError> {
        Ok(value.clone())
    }
}
