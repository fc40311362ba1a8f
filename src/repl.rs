use std::io::Write;

use crate::executor::{self, Outcome};
use crate::parser;
use crate::storage::schema::Schema;
use crate::types::error::Result;

/// Whether the driver should keep prompting after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// Dispatch one input line: meta-commands first, then the statement
/// pipeline. All prompt output goes through `out`; only storage-tier
/// failures escape as errors, and the caller must treat those as fatal.
pub fn process_line(line: &str, schema: &mut Schema, out: &mut impl Write) -> Result<Control> {
    if line.starts_with('.') {
        if line == ".exit" {
            return Ok(Control::Exit);
        }
        writeln!(out, "Unrecognized command '{line}'")?;
        return Ok(Control::Continue);
    }

    match parser::prepare_statement(line, schema) {
        Ok(statement) => match executor::execute_statement(statement, schema, out)? {
            Outcome::Success => writeln!(out, "Executed.")?,
            Outcome::TableFull => writeln!(out, "Error: Table full.")?,
        },
        Err(error) => writeln!(out, "{error}")?,
    }

    Ok(Control::Continue)
}
