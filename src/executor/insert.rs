use crate::executor::Outcome;
use crate::storage::cursor::Cursor;
use crate::storage::table::Table;
use crate::types::error::Result;
use crate::types::row::Row;

/// Append the prepared row at the end-of-table cursor position.
pub fn execute(table: &mut Table, row: &Row) -> Result<Outcome> {
    if table.num_rows >= table.max_rows {
        return Ok(Outcome::TableFull);
    }

    let cursor = Cursor::end(table);
    table.write_row(cursor.row_num(), row)?;
    table.num_rows += 1;

    Ok(Outcome::Success)
}
