use crate::executor::{predicate, Outcome};
use crate::parser::statement::WhereClause;
use crate::storage::cursor::Cursor;
use crate::storage::table::Table;
use crate::types::error::Result;

/// Two-pass delete. Pass one zeroes every matching row in place; pass
/// two slides survivors toward the front so the occupied range stays
/// contiguous and in order, then the row count shrinks by the number of
/// deletions.
///
/// A zeroed row is the hole marker, so a legitimately all-zero payload
/// would be swallowed; the positive-`id` rule keeps that pattern out of
/// any table whose first column is an integer `id`.
pub fn execute(table: &mut Table, filter: &WhereClause) -> Result<Outcome> {
    let mut deleted = 0;

    let mut cursor = Cursor::start(table);
    while !cursor.at_end() {
        let row = table.read_row(cursor.row_num())?;
        if predicate::matches(&row, filter, &table.columns) {
            table.row_slice(cursor.row_num())?.fill(0);
            deleted += 1;
        }
        cursor.advance(table);
    }

    let mut read_cursor = Cursor::start(table);
    let mut write_cursor: Option<Cursor> = None;
    while !read_cursor.at_end() {
        if table.row_is_zeroed(read_cursor.row_num())? {
            // Only the first hole of a zero run becomes the write target.
            if write_cursor.is_none() {
                write_cursor = Some(read_cursor.clone());
            }
        } else if let Some(hole) = write_cursor.as_mut() {
            let bytes = table.row_slice(read_cursor.row_num())?.to_vec();
            table.row_slice(hole.row_num())?.copy_from_slice(&bytes);
            table.row_slice(read_cursor.row_num())?.fill(0);
            hole.advance(table);
        }
        read_cursor.advance(table);
    }

    table.num_rows -= deleted;

    Ok(Outcome::Success)
}
