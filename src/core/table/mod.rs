pub mod csv_io;
mod value;

use std::collections::HashSet;

pub use csv_io::*;
pub use value::Value;

use crate::utils::{Error, MovieDataResult};

/// Ordered rows of dynamically typed cells, addressable by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Value]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Append a row. Short rows are padded with nulls; long rows are rejected.
    pub fn push_row(&mut self, mut row: Vec<Value>) -> MovieDataResult<()> {
        if row.len() > self.columns.len() {
            return Err(Error::Other(format!(
                "row has {} cells but table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        row.resize(self.columns.len(), Value::Null);
        self.rows.push(row);
        Ok(())
    }

    pub fn column_index(&self, name: &str) -> MovieDataResult<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| Error::MissingColumn(name.to_string()))
    }

    pub fn require_columns(&self, names: &[&str]) -> MovieDataResult<Vec<usize>> {
        names.iter().map(|n| self.column_index(n)).collect()
    }

    /// Index of `name`, appending an all-null column when it does not exist yet.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Ok(idx) = self.column_index(name) {
            return idx;
        }
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(Value::Null);
        }
        self.columns.len() - 1
    }

    pub fn get(&self, row: usize, col: usize) -> &Value {
        &self.rows[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: Value) {
        self.rows[row][col] = value;
    }

    /// Drop every row holding a null in any of `subset`. Returns the number dropped.
    pub fn drop_nulls(&mut self, subset: &[&str]) -> MovieDataResult<usize> {
        let idxs = self.require_columns(subset)?;
        Ok(self.retain(|row| idxs.iter().all(|&i| !row[i].is_null())))
    }

    /// Keep rows matching `keep`, preserving order. Returns the number dropped.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&[Value]) -> bool,
    {
        let before = self.rows.len();
        self.rows.retain(|row| keep(row));
        before - self.rows.len()
    }

    /// Replace every cell of `column` with `convert(cell)`, stopping at the first error.
    pub fn map_column<F>(&mut self, column: &str, mut convert: F) -> MovieDataResult<()>
    where
        F: FnMut(&Value) -> MovieDataResult<Value>,
    {
        let idx = self.column_index(column)?;
        for row in &mut self.rows {
            row[idx] = convert(&row[idx])?;
        }
        Ok(())
    }

    /// Remove rows repeating an earlier row's values on `subset`, keeping the first.
    pub fn drop_duplicates(&mut self, subset: &[&str]) -> MovieDataResult<usize> {
        let idxs = self.require_columns(subset)?;
        let mut seen: HashSet<Vec<String>> = HashSet::new();
        Ok(self.retain(|row| seen.insert(idxs.iter().map(|&i| row[i].key()).collect())))
    }
}
