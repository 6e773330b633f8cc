pub mod financials;
pub mod metadata;
pub mod ratings;

pub use financials::*;
pub use metadata::*;
pub use ratings::*;

use chrono::{NaiveDate, NaiveDateTime};

use crate::core::table::Value;
use crate::utils::{Error, MovieDataResult};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%b %d, %Y", "%B %d, %Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Count-like cell to an integer. Floats truncate toward zero.
pub fn coerce_int(column: &str, value: &Value) -> MovieDataResult<Value> {
    let conversion_error = || Error::TypeConversion {
        column: column.to_string(),
        value: value.to_string(),
        target: "integer",
    };

    match value {
        Value::Null | Value::Int(_) => Ok(value.clone()),
        Value::Float(f) => float_to_int(*f).map(Value::Int).ok_or_else(conversion_error),
        Value::Bool(b) => Ok(Value::Int(i64::from(*b))),
        Value::Text(s) => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i64>() {
                return Ok(Value::Int(i));
            }
            s.parse::<f64>()
                .ok()
                .and_then(float_to_int)
                .map(Value::Int)
                .ok_or_else(conversion_error)
        }
        _ => Err(conversion_error()),
    }
}

// Truncates toward zero; NaN, infinities and values outside i64 are rejected.
fn float_to_int(f: f64) -> Option<i64> {
    let t = f.trunc();
    // i64::MAX as f64 rounds up to 2^63, which no longer fits
    if t >= i64::MIN as f64 && t < i64::MAX as f64 {
        Some(t as i64)
    } else {
        None
    }
}

pub fn parse_date(raw: &str) -> MovieDataResult<NaiveDate> {
    let s = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
        .ok_or_else(|| Error::DateParse(raw.to_string()))
}

pub fn coerce_date(value: &Value) -> MovieDataResult<Value> {
    match value {
        Value::Null | Value::Date(_) => Ok(value.clone()),
        Value::Text(s) => parse_date(s).map(Value::Date),
        other => Err(Error::DateParse(other.to_string())),
    }
}
