pub mod error;
pub mod literal;
pub mod statement;

use crate::parser::error::PrepareError;
use crate::parser::statement::{Operator, Projection, Statement, StatementKind, WhereClause};
use crate::storage::schema::Schema;
use crate::storage::table::Table;
use crate::types::row::Row;
use crate::types::value::{self, ColumnType};

/// Classify the verb and produce a statement bound to a schema table.
///
/// Keyword matching happens on a lowercased copy of the trimmed line;
/// table names, column names, and literals are read back out of the
/// original-case text at the same byte offsets.
pub fn prepare_statement(line: &str, schema: &Schema) -> Result<Statement, PrepareError> {
    let text = line.trim();
    let lower = text.to_ascii_lowercase();

    if lower.starts_with("insert") {
        prepare_insert(text, &lower, schema)
    } else if lower.starts_with("select") {
        prepare_select(text, &lower, schema)
    } else if lower.starts_with("update") {
        prepare_update(text, &lower, schema)
    } else if lower.starts_with("delete") {
        prepare_delete(text, &lower, schema)
    } else {
        Err(PrepareError::Unrecognized(line.to_string()))
    }
}

fn resolve_table<'a>(schema: &'a Schema, name: &str) -> Result<(usize, &'a Table), PrepareError> {
    let index = schema.find_table(name).ok_or(PrepareError::TableNotFound)?;
    Ok((index, schema.table(index)))
}

/// `insert into <table> values (<v1>, <v2>, ...)`
///
/// Values are split on `,` without quote awareness, so a quoted text
/// literal must not contain a comma. Text values may be bare or
/// single-quote delimited.
fn prepare_insert(text: &str, lower: &str, schema: &Schema) -> Result<Statement, PrepareError> {
    if !lower.starts_with("insert into ") {
        return Err(PrepareError::Syntax);
    }
    let values_pos = lower.find(" values ").ok_or(PrepareError::Syntax)?;

    let name = text
        .get("insert into ".len()..values_pos)
        .ok_or(PrepareError::Syntax)?
        .trim();
    let (table_index, table) = resolve_table(schema, name)?;

    let open = lower[values_pos..]
        .find('(')
        .map(|i| i + values_pos)
        .ok_or(PrepareError::Syntax)?;
    let close = lower.rfind(')').ok_or(PrepareError::Syntax)?;
    if close <= open {
        return Err(PrepareError::Syntax);
    }

    let values: Vec<&str> = text[open + 1..close].split(',').map(str::trim).collect();
    if values.len() != table.columns.len() {
        return Err(PrepareError::Syntax);
    }

    let mut row = Row::zeroed(table.row_size);
    for (column, &token) in table.columns.iter().zip(&values) {
        match column.column_type {
            ColumnType::Integer => {
                let parsed: i32 = token.parse().map_err(|_| PrepareError::Syntax)?;
                if parsed <= 0 && column.name == "id" {
                    return Err(PrepareError::NegativeId);
                }
                row.set_column(column, &value::encode_integer(parsed, column.size));
            }
            ColumnType::Varchar => {
                let inner = literal::unquote(token).unwrap_or(token);
                if inner.len() > column.size {
                    return Err(PrepareError::StringTooLong);
                }
                row.set_column(column, inner.as_bytes());
            }
            ColumnType::Real => {
                let parsed: f64 = token.parse().map_err(|_| PrepareError::Syntax)?;
                row.set_column(column, &value::encode_real(parsed, column.size));
            }
        }
    }

    Ok(Statement {
        table: table_index,
        kind: StatementKind::Insert { row },
    })
}

/// `select <projection> from <table> [where <column> <op> <literal>]`
/// where `<projection>` is `*` or a comma-separated column list.
fn prepare_select(text: &str, lower: &str, schema: &Schema) -> Result<Statement, PrepareError> {
    let from_pos = lower.find(" from ").ok_or(PrepareError::Syntax)?;
    let projection_part = text
        .get("select ".len()..from_pos)
        .ok_or(PrepareError::Syntax)?
        .trim();

    let where_pos = lower.find(" where ");
    let name_end = where_pos.unwrap_or(text.len());
    let name = text
        .get(from_pos + " from ".len()..name_end)
        .ok_or(PrepareError::Syntax)?
        .trim();
    let (table_index, table) = resolve_table(schema, name)?;

    let projection = if projection_part == "*" {
        Projection::All
    } else {
        let mut columns = Vec::new();
        for column_name in projection_part.split(',').map(str::trim) {
            let index = table
                .find_column(column_name)
                .ok_or(PrepareError::Syntax)?;
            columns.push(index);
        }
        Projection::Columns(columns)
    };

    let filter = match where_pos {
        Some(pos) => Some(parse_where_clause(&text[pos + " where ".len()..], table)?),
        None => None,
    };

    Ok(Statement {
        table: table_index,
        kind: StatementKind::Select { projection, filter },
    })
}

/// `update <table> set <column> = <literal> where <column> <op> <literal>`
///
/// Exactly one assignment is supported and the filter is mandatory.
fn prepare_update(text: &str, lower: &str, schema: &Schema) -> Result<Statement, PrepareError> {
    let set_pos = lower.find(" set ").ok_or(PrepareError::Syntax)?;
    let where_pos = lower.find(" where ").ok_or(PrepareError::Syntax)?;
    if where_pos < set_pos {
        return Err(PrepareError::Syntax);
    }

    let name = text
        .get("update ".len()..set_pos)
        .ok_or(PrepareError::Syntax)?
        .trim();
    let (table_index, table) = resolve_table(schema, name)?;

    let assignment = text
        .get(set_pos + " set ".len()..where_pos)
        .ok_or(PrepareError::Syntax)?;
    let (column_part, value_part) = assignment.split_once('=').ok_or(PrepareError::Syntax)?;
    let column_index = table
        .find_column(column_part.trim())
        .ok_or(PrepareError::Syntax)?;

    let value = literal::encode(table.column(column_index), value_part.trim())?;
    let filter = parse_where_clause(&text[where_pos + " where ".len()..], table)?;

    Ok(Statement {
        table: table_index,
        kind: StatementKind::Update {
            column: column_index,
            value,
            filter,
        },
    })
}

/// `delete from <table> where <column> <op> <literal>`
///
/// The filter is mandatory.
fn prepare_delete(text: &str, lower: &str, schema: &Schema) -> Result<Statement, PrepareError> {
    if !lower.starts_with("delete from ") {
        return Err(PrepareError::Syntax);
    }
    let where_pos = lower.find(" where ").ok_or(PrepareError::Syntax)?;

    let name = text
        .get("delete from ".len()..where_pos)
        .ok_or(PrepareError::Syntax)?
        .trim();
    let (table_index, table) = resolve_table(schema, name)?;

    let filter = parse_where_clause(&text[where_pos + " where ".len()..], table)?;

    Ok(Statement {
        table: table_index,
        kind: StatementKind::Delete { filter },
    })
}

/// The filter grammar is space-separated: `<column> <op> <literal>`.
/// Text columns only admit equality tests, and their literals must be
/// quoted.
fn parse_where_clause(part: &str, table: &Table) -> Result<WhereClause, PrepareError> {
    let mut tokens = part.split_whitespace();
    let (Some(column_name), Some(symbol), Some(value_text)) =
        (tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(PrepareError::Syntax);
    };

    let column_index = table
        .find_column(column_name)
        .ok_or(PrepareError::Syntax)?;
    let column = table.column(column_index);

    let op = Operator::from_symbol(symbol).ok_or(PrepareError::Syntax)?;
    if column.column_type == ColumnType::Varchar && op.is_ordering() {
        return Err(PrepareError::Syntax);
    }

    let value = literal::encode(column, value_text)?;

    Ok(WhereClause {
        column: column_index,
        op,
        value,
    })
}
