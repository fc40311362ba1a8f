use std::fmt::Write;

use crate::types::value::{self, ColumnDefinition, ColumnType};

/// In-memory image of one row. A carrier between page bytes and the
/// executor; never persisted as such.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    data: Vec<u8>,
}

impl Row {
    /// A fresh row buffer with every byte zeroed, so unused VARCHAR tail
    /// bytes are deterministic NULs once the row reaches disk.
    pub fn zeroed(row_size: usize) -> Self {
        Self {
            data: vec![0; row_size],
        }
    }

    /// Column-by-column copy out of a page slot.
    pub fn read_from(source: &[u8], columns: &[ColumnDefinition], row_size: usize) -> Self {
        let mut data = vec![0u8; row_size];
        for column in columns {
            let range = column.offset..column.offset + column.size;
            data[range.clone()].copy_from_slice(&source[range]);
        }
        Self { data }
    }

    /// Copy the full row image into a page slot.
    pub fn write_to(&self, destination: &mut [u8]) {
        destination[..self.data.len()].copy_from_slice(&self.data);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Overwrite one column's byte range. Input longer than the column
    /// is cut off at the column width.
    pub fn set_column(&mut self, column: &ColumnDefinition, bytes: &[u8]) {
        let len = bytes.len().min(column.size);
        self.data[column.offset..column.offset + len].copy_from_slice(&bytes[..len]);
    }

    fn column_bytes(&self, column: &ColumnDefinition) -> &[u8] {
        &self.data[column.offset..column.offset + column.size]
    }

    pub fn integer(&self, column: &ColumnDefinition) -> i32 {
        value::decode_integer(self.column_bytes(column))
    }

    pub fn real(&self, column: &ColumnDefinition) -> f64 {
        value::decode_real(self.column_bytes(column))
    }

    pub fn text(&self, column: &ColumnDefinition) -> String {
        String::from_utf8_lossy(value::text_prefix(self.column_bytes(column))).into_owned()
    }

    /// Render the projected columns as `(v1, v2, ...)`: integers in
    /// decimal, reals with six decimal places, text up to its first NUL.
    pub fn format<'a, I>(&self, columns: I) -> String
    where
        I: IntoIterator<Item = &'a ColumnDefinition>,
    {
        let mut out = String::from("(");
        for (i, column) in columns.into_iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            match column.column_type {
                ColumnType::Integer => {
                    let _ = write!(out, "{}", self.integer(column));
                }
                ColumnType::Varchar => out.push_str(&self.text(column)),
                ColumnType::Real => {
                    let _ = write!(out, "{:.6}", self.real(column));
                }
            }
        }
        out.push(')');
        out
    }
}
