use crate::parser::statement::{Operator, WhereClause};
use crate::types::row::Row;
use crate::types::value::{self, ColumnDefinition, ColumnType};

/// Evaluate one `column OP literal` predicate against a deserialized
/// row, per the column's type.
pub fn matches(row: &Row, clause: &WhereClause, columns: &[ColumnDefinition]) -> bool {
    let column = &columns[clause.column];
    match column.column_type {
        ColumnType::Integer => {
            let lhs = row.integer(column);
            let rhs = value::decode_integer(&clause.value);
            clause.op.holds(lhs.cmp(&rhs))
        }
        ColumnType::Real => {
            let lhs = row.real(column);
            let rhs = value::decode_real(&clause.value);
            match lhs.partial_cmp(&rhs) {
                Some(ordering) => clause.op.holds(ordering),
                None => false,
            }
        }
        ColumnType::Varchar => {
            let lhs = row.text(column);
            let rhs = String::from_utf8_lossy(value::text_prefix(&clause.value)).into_owned();
            match clause.op {
                Operator::Equal => lhs == rhs,
                Operator::NotEqual => lhs != rhs,
                // Ordering on text is rejected at parse time.
                _ => false,
            }
        }
    }
}
