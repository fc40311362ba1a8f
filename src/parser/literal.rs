use crate::parser::error::PrepareError;
use crate::types::value::{self, ColumnDefinition, ColumnType};

/// Strip the single-quote delimiters off a string literal.
pub fn unquote(text: &str) -> Option<&str> {
    text.strip_prefix('\'')?.strip_suffix('\'')
}

/// Encode a literal token into a `column.size`-wide byte buffer, NUL
/// padded. WHERE and UPDATE literals come through here; text must be
/// quoted.
pub fn encode(column: &ColumnDefinition, text: &str) -> Result<Vec<u8>, PrepareError> {
    match column.column_type {
        ColumnType::Integer => {
            let parsed: i32 = text.parse().map_err(|_| PrepareError::Syntax)?;
            Ok(value::encode_integer(parsed, column.size))
        }
        ColumnType::Real => {
            let parsed: f64 = text.parse().map_err(|_| PrepareError::Syntax)?;
            Ok(value::encode_real(parsed, column.size))
        }
        ColumnType::Varchar => {
            let inner = unquote(text).ok_or(PrepareError::Syntax)?;
            Ok(value::encode_text(inner, column.size))
        }
    }
}
