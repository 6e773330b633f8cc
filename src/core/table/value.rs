use std::fmt;

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Raw CSV field: empty and NaN-like fields are missing values.
    pub fn from_field(field: &str) -> Self {
        let trimmed = field.trim();
        if trimmed.is_empty() || matches!(trimmed, "NaN" | "nan" | "NULL" | "null" | "None") {
            Value::Null
        } else {
            Value::Text(field.to_string())
        }
    }

    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Movie identifier as sent to the lookup service. Integral floats such as
    /// `603.0` (left behind by table merges) render without the fraction.
    pub fn as_identifier(&self) -> Option<String> {
        match self {
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(format!("{}", *f as i64)),
            Value::Float(f) if f.is_finite() => Some(f.to_string()),
            Value::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return None;
                }
                match s.parse::<f64>() {
                    Ok(f) if f.is_finite() && f.fract() == 0.0 && s.contains('.') => {
                        Some(format!("{}", f as i64))
                    }
                    _ => Some(s.to_string()),
                }
            }
            _ => None,
        }
    }

    // Typed key for duplicate detection; Text("1") and Int(1) stay distinct.
    pub(crate) fn key(&self) -> String {
        format!("{self:?}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Text(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) if x.is_nan() => Ok(()),
            Value::Float(x) => write!(f, "{x}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}
