use tracing::debug;

use super::coerce_date;
use crate::core::table::Table;
use crate::utils::currency::normalize_currency;
use crate::utils::MovieDataResult;

pub const FINANCIALS_REQUIRED: [&str; 4] = [
    "production_budget",
    "domestic_gross",
    "worldwide_gross",
    "release_date",
];

const CURRENCY_COLUMNS: [&str; 3] = ["production_budget", "domestic_gross", "worldwide_gross"];

pub fn clean_financials(mut table: Table) -> MovieDataResult<Table> {
    let missing = table.drop_nulls(&FINANCIALS_REQUIRED)?;
    for column in CURRENCY_COLUMNS {
        table.map_column(column, normalize_currency)?;
    }
    table.map_column("release_date", coerce_date)?;

    debug!(
        "Financials cleaned: dropped {} incomplete rows, {} rows left",
        missing,
        table.len()
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::{read_csv_from, Value};
    use crate::utils::Error;

    const RAW: &str = "\
id,release_date,movie,production_budget,domestic_gross,worldwide_gross
1,\"Dec 18, 2009\",Avatar,\"$425,000,000\",\"$760,507,625\",\"$2,776,345,279\"
2,\"May 20, 2011\",Pirates of the Caribbean: On Stranger Tides,\"$20,000,000\",,\"$1,045,663,875\"
3,\"Jun 7, 2019\",Dark Phoenix,\"$20,000,000\",\"$42,762,350\",\"$149,762,350\"
";

    #[test]
    fn currency_columns_become_floats() {
        let t = clean_financials(read_csv_from(RAW.as_bytes()).unwrap()).unwrap();
        assert_eq!(t.len(), 2);

        let budget = t.column_index("production_budget").unwrap();
        let world = t.column_index("worldwide_gross").unwrap();
        let movie = t.column_index("movie").unwrap();
        assert_eq!(t.get(1, movie), &Value::text("Dark Phoenix"));
        assert_eq!(t.get(1, budget), &Value::Float(20_000_000.0));
        assert_eq!(t.get(0, world), &Value::Float(2_776_345_279.0));
        assert!(t.rows().all(|r| matches!(r[t.column_index("release_date").unwrap()], Value::Date(_))));
    }

    #[test]
    fn null_gross_rows_are_dropped() {
        let t = clean_financials(read_csv_from(RAW.as_bytes()).unwrap()).unwrap();
        let movie = t.column_index("movie").unwrap();
        assert!(t
            .rows()
            .all(|r| r[movie] != Value::text("Pirates of the Caribbean: On Stranger Tides")));
    }

    #[test]
    fn malformed_currency_is_fatal() {
        let raw = "production_budget,domestic_gross,worldwide_gross,release_date\nlots,$1,$2,2019-06-07\n";
        let err = clean_financials(read_csv_from(raw.as_bytes()).unwrap()).unwrap_err();
        assert!(matches!(err, Error::CurrencyParse(s) if s == "lots"));
    }
}
