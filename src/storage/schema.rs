use std::fs;
use std::path::Path;

use tracing::debug;

use crate::storage::table::{Table, TableDescriptor};
use crate::types::error::{DbError, Result};
use crate::types::value::{ColumnDefinition, ColumnType};

/// Default directory for table backing files.
pub const DATA_DIR: &str = "data";

/// The set of tables loaded at startup. Owns every table and flushes
/// them on close; there is no runtime schema mutation.
pub struct Schema {
    tables: Vec<Table>,
}

impl Schema {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_in(path, Path::new(DATA_DIR))
    }

    /// Read the schema descriptor and open one backing file per table
    /// under `data_dir`.
    pub fn open_in<P: AsRef<Path>>(path: P, data_dir: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let mut lines = text.lines();

        let num_tables: usize = lines
            .next()
            .ok_or_else(|| schema_format("missing table count"))?
            .trim()
            .parse()
            .map_err(|_| schema_format("table count is not a number"))?;

        let mut tables = Vec::with_capacity(num_tables);
        for index in 0..num_tables {
            let line = lines
                .next()
                .ok_or_else(|| schema_format(format!("missing definition for table {index}")))?;
            let descriptor = parse_table_line(line)?;
            tables.push(Table::open(descriptor, data_dir)?);
        }

        debug!(num_tables = tables.len(), "schema loaded");
        Ok(Self { tables })
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn table(&self, index: usize) -> &Table {
        &self.tables[index]
    }

    pub fn table_mut(&mut self, index: usize) -> &mut Table {
        &mut self.tables[index]
    }

    pub fn find_table(&self, name: &str) -> Option<usize> {
        self.tables.iter().position(|table| table.name == name)
    }

    /// Flush and release every table.
    pub fn close(&mut self) -> Result<()> {
        for table in &mut self.tables {
            table.close()?;
        }
        debug!(num_tables = self.tables.len(), "schema closed");
        Ok(())
    }
}

fn schema_format(reason: impl Into<String>) -> DbError {
    DbError::SchemaFormat {
        reason: reason.into(),
    }
}

/// One descriptor line: `<name>;<num_columns>;<col>:<size>:<type>,...`
/// No whitespace is permitted between fields.
fn parse_table_line(line: &str) -> Result<TableDescriptor> {
    let mut fields = line.split(';');

    let name = fields
        .next()
        .filter(|field| !field.is_empty())
        .ok_or_else(|| schema_format("empty table name"))?;
    let declared: usize = fields
        .next()
        .ok_or_else(|| schema_format(format!("table '{name}': missing column count")))?
        .parse()
        .map_err(|_| schema_format(format!("table '{name}': column count is not a number")))?;
    let column_defs = fields
        .next()
        .ok_or_else(|| schema_format(format!("table '{name}': missing column definitions")))?;
    if fields.next().is_some() {
        return Err(schema_format(format!("table '{name}': trailing fields")));
    }

    let mut columns: Vec<ColumnDefinition> = Vec::with_capacity(declared);
    for column_def in column_defs.split(',') {
        let mut parts = column_def.split(':');
        let (Some(column_name), Some(size), Some(type_name), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(schema_format(format!(
                "table '{name}': bad column definition '{column_def}'"
            )));
        };

        let size: usize = size
            .parse()
            .map_err(|_| schema_format(format!("column '{column_name}': size is not a number")))?;
        if size == 0 {
            return Err(schema_format(format!("column '{column_name}': zero size")));
        }

        if columns.iter().any(|column| column.name == column_name) {
            return Err(schema_format(format!(
                "table '{name}': duplicate column '{column_name}'"
            )));
        }

        columns.push(ColumnDefinition {
            name: column_name.to_string(),
            column_type: ColumnType::parse(type_name)?,
            size,
            offset: 0,
        });
    }

    if columns.len() != declared {
        return Err(schema_format(format!(
            "table '{name}': declared {declared} columns, found {}",
            columns.len()
        )));
    }

    Ok(TableDescriptor {
        name: name.to_string(),
        columns,
    })
}
