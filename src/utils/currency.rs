use once_cell::sync::Lazy;
use regex::Regex;

use super::Error;
use crate::core::table::Value;

// "$1,234,567", "1234.50", "-$5,000", "$-5,000"
static CURRENCY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\$?-?(\d[\d,]*)?(\.\d+)?$").unwrap());

/// Parse a dollar amount, stripping the currency symbol and thousands separators.
pub fn parse_currency(raw: &str) -> Result<f64, Error> {
    let s = raw.trim();
    if !CURRENCY_RE.is_match(s) || !s.chars().any(|c| c.is_ascii_digit()) {
        return Err(Error::CurrencyParse(raw.to_string()));
    }
    let cleaned: String = s.chars().filter(|c| *c != '$' && *c != ',').collect();
    cleaned
        .parse::<f64>()
        .map_err(|_| Error::CurrencyParse(raw.to_string()))
}

/// Numbers pass through as floats, currency strings are parsed, nulls stay null.
pub fn normalize_currency(value: &Value) -> Result<Value, Error> {
    match value {
        Value::Null => Ok(Value::Null),
        Value::Float(f) => Ok(Value::Float(*f)),
        Value::Int(i) => Ok(Value::Float(*i as f64)),
        Value::Text(s) => parse_currency(s).map(Value::Float),
        other => Err(Error::CurrencyParse(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dollar_strings() {
        assert_eq!(parse_currency("$1,234.50").unwrap(), 1234.50);
        assert_eq!(parse_currency("$20,000,000").unwrap(), 20_000_000.0);
        assert_eq!(parse_currency("425000000").unwrap(), 425_000_000.0);
        assert_eq!(parse_currency("-$7,000").unwrap(), -7000.0);
    }

    #[test]
    fn numbers_pass_through() {
        assert_eq!(normalize_currency(&Value::Float(1000.0)).unwrap(), Value::Float(1000.0));
        assert_eq!(normalize_currency(&Value::Int(42)).unwrap(), Value::Float(42.0));
        assert_eq!(normalize_currency(&Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn rejects_other_shapes() {
        for bad in ["garbage", "$", "", "12 000", "€1,000", "inf", "1.2.3"] {
            assert!(
                matches!(parse_currency(bad), Err(Error::CurrencyParse(_))),
                "accepted {bad:?}"
            );
        }
        assert!(normalize_currency(&Value::text("garbage")).is_err());
    }
}
