use std::io::Write;

use crate::executor::{predicate, Outcome};
use crate::parser::statement::{Projection, WhereClause};
use crate::storage::cursor::Cursor;
use crate::storage::table::Table;
use crate::types::error::Result;

/// Walk the table from the start, printing every row the filter accepts
/// as `(v1, v2, ...)`. An absent filter accepts every row.
pub fn execute(
    table: &mut Table,
    projection: &Projection,
    filter: Option<&WhereClause>,
    out: &mut impl Write,
) -> Result<Outcome> {
    let mut cursor = Cursor::start(table);
    while !cursor.at_end() {
        let row = table.read_row(cursor.row_num())?;

        if let Some(clause) = filter {
            if !predicate::matches(&row, clause, &table.columns) {
                cursor.advance(table);
                continue;
            }
        }

        let line = match projection {
            Projection::All => row.format(table.columns.iter()),
            Projection::Columns(indices) => row.format(indices.iter().map(|&i| table.column(i))),
        };
        writeln!(out, "{line}")?;

        cursor.advance(table);
    }

    Ok(Outcome::Success)
}
