use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, Writer};
use tracing::debug;

use super::{Table, Value};
use crate::utils::MovieDataResult;

pub fn read_csv(path: &Path) -> MovieDataResult<Table> {
    debug!("Reading CSV table: '{}'", path.display());
    let file = std::fs::File::open(path)?;
    read_csv_from(file)
}

pub fn read_csv_from<R: Read>(reader: R) -> MovieDataResult<Table> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let mut table = Table::new(headers);
    for record in rdr.records() {
        let record = record?;
        table.push_row(record.iter().map(Value::from_field).collect())?;
    }
    Ok(table)
}

pub fn write_csv(table: &Table, path: &Path) -> MovieDataResult<()> {
    let file = std::fs::File::create(path)?;
    write_csv_to(table, file)?;
    debug!("Wrote {} rows to '{}'", table.len(), path.display());
    Ok(())
}

pub fn write_csv_to<W: Write>(table: &Table, writer: W) -> MovieDataResult<()> {
    let mut wrt = Writer::from_writer(writer);
    wrt.write_record(table.columns())?;
    for row in table.rows() {
        wrt.write_record(row.iter().map(|v| v.to_string()))?;
    }
    wrt.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_headers_and_nulls() {
        let data = "title,numvotes\nHeat,\"12,000\"\nAlien,\n";
        let t = read_csv_from(data.as_bytes()).unwrap();
        assert_eq!(t.columns(), &["title".to_string(), "numvotes".to_string()]);
        assert_eq!(t.len(), 2);
        assert_eq!(t.get(0, 1), &Value::text("12,000"));
        assert!(t.get(1, 1).is_null());
    }

    #[test]
    fn file_round_trip_keeps_cells() {
        let mut t = Table::new(["id_x", "franchise", "collection"]);
        t.push_row(vec![Value::Int(9799), Value::Bool(true), Value::text("The Fast and the Furious Collection")])
            .unwrap();
        t.push_row(vec![Value::Int(949), Value::Bool(false), Value::Null]).unwrap();

        let file = tempfile::NamedTempFile::new().unwrap();
        write_csv(&t, file.path()).unwrap();
        let content = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(
            content,
            "id_x,franchise,collection\n9799,true,The Fast and the Furious Collection\n949,false,\n"
        );

        let back = read_csv(file.path()).unwrap();
        assert_eq!(back.len(), 2);
        assert!(back.get(1, 2).is_null());
    }
}
