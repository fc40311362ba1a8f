pub mod delete;
pub mod insert;
pub mod predicate;
pub mod select;
pub mod update;

use std::io::Write;

use crate::parser::statement::{Statement, StatementKind};
use crate::storage::schema::Schema;
use crate::types::error::Result;

/// What a statement reports back to the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    TableFull,
}

/// Run a prepared statement against its table. Row output (SELECT) goes
/// to `out`; storage failures bubble up as fatal.
pub fn execute_statement(
    statement: Statement,
    schema: &mut Schema,
    out: &mut impl Write,
) -> Result<Outcome> {
    let table = schema.table_mut(statement.table);
    match statement.kind {
        StatementKind::Insert { row } => insert::execute(table, &row),
        StatementKind::Select { projection, filter } => {
            select::execute(table, &projection, filter.as_ref(), out)
        }
        StatementKind::Update {
            column,
            value,
            filter,
        } => update::execute(table, column, &value, &filter),
        StatementKind::Delete { filter } => delete::execute(table, &filter),
    }
}
