use tracing::debug;

use super::{coerce_date, coerce_int};
use crate::core::table::Table;
use crate::utils::MovieDataResult;

pub const METADATA_REQUIRED: [&str; 4] = ["popularity", "vote_count", "release_date", "title"];

pub fn clean_metadata(mut table: Table) -> MovieDataResult<Table> {
    let missing = table.drop_nulls(&METADATA_REQUIRED)?;
    table.map_column("release_date", coerce_date)?;
    table.map_column("vote_count", |v| coerce_int("vote_count", v))?;
    let duplicates = table.drop_duplicates(&["title", "release_date"])?;

    debug!(
        "Metadata cleaned: dropped {} incomplete and {} duplicate rows, {} rows left",
        missing,
        duplicates,
        table.len()
    );
    Ok(table)
}
