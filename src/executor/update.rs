use crate::executor::{predicate, Outcome};
use crate::parser::statement::WhereClause;
use crate::storage::cursor::Cursor;
use crate::storage::table::Table;
use crate::types::error::Result;

/// Overwrite the target column of every row the filter accepts, writing
/// each modified row back through its cursor position.
pub fn execute(
    table: &mut Table,
    column: usize,
    value: &[u8],
    filter: &WhereClause,
) -> Result<Outcome> {
    let mut cursor = Cursor::start(table);
    while !cursor.at_end() {
        let mut row = table.read_row(cursor.row_num())?;

        if predicate::matches(&row, filter, &table.columns) {
            row.set_column(table.column(column), value);
            table.write_row(cursor.row_num(), &row)?;
        }

        cursor.advance(table);
    }

    Ok(Outcome::Success)
}
