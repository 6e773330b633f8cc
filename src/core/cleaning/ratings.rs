use tracing::debug;

use super::coerce_int;
use crate::core::table::{Table, Value};
use crate::utils::MovieDataResult;

pub const RATINGS_REQUIRED: [&str; 3] = ["averagerating", "numvotes", "primary_name"];
pub const DEFAULT_MIN_VOTES: i64 = 1000;

/// Drop unrated rows, make `numvotes` integral and keep titles with at least `min_votes` votes.
pub fn clean_ratings(mut table: Table, min_votes: i64) -> MovieDataResult<Table> {
    let missing = table.drop_nulls(&RATINGS_REQUIRED)?;
    table.map_column("numvotes", |v| coerce_int("numvotes", v))?;

    let votes = table.column_index("numvotes")?;
    let few_votes = table.retain(|row| matches!(row[votes], Value::Int(n) if n >= min_votes));

    debug!(
        "Ratings cleaned: dropped {} incomplete and {} under {} votes, {} rows left",
        missing,
        few_votes,
        min_votes,
        table.len()
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::read_csv_from;
    use crate::utils::Error;

    const RAW: &str = "\
movie_id,averagerating,numvotes,primary_name
tt0063540,7.0,77,Harnam Singh Rawail
tt0066787,7.2,43000,Mani Kaul
tt0069049,6.9,4517.0,Orson Welles
tt0100275,,2000,Raoul Ruiz
tt0137204,8.1,1000,
tt0146592,6.5,1000,Pál Sándor
";

    #[test]
    fn keeps_complete_rows_with_enough_votes() {
        let t = clean_ratings(read_csv_from(RAW.as_bytes()).unwrap(), DEFAULT_MIN_VOTES).unwrap();
        let votes = t.column_index("numvotes").unwrap();
        let ids: Vec<String> = t.rows().map(|r| r[0].to_string()).collect();
        assert_eq!(ids, ["tt0066787", "tt0069049", "tt0146592"]);

        let required = t.require_columns(&RATINGS_REQUIRED).unwrap();
        for row in t.rows() {
            assert!(matches!(row[votes], Value::Int(n) if n >= 1000));
            assert!(required.iter().all(|&i| !row[i].is_null()));
        }
    }

    #[test]
    fn non_numeric_votes_are_fatal() {
        let raw = "averagerating,numvotes,primary_name\n7.0,lots,Someone\n";
        let err = clean_ratings(read_csv_from(raw.as_bytes()).unwrap(), DEFAULT_MIN_VOTES).unwrap_err();
        assert!(matches!(err, Error::TypeConversion { .. }));
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let raw = "averagerating,numvotes\n7.0,2000\n";
        let err = clean_ratings(read_csv_from(raw.as_bytes()).unwrap(), DEFAULT_MIN_VOTES).unwrap_err();
        assert!(matches!(err, Error::MissingColumn(c) if c == "primary_name"));
    }
}
