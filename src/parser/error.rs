use thiserror::Error;

/// User-facing preparation failures. The `Display` form of each variant
/// is the exact line the prompt prints for it, so the REPL driver can
/// report these directly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrepareError {
    #[error("Syntax error.")]
    Syntax,

    #[error("Table not found.")]
    TableNotFound,

    #[error("ID must be positive.")]
    NegativeId,

    #[error("String is too long.")]
    StringTooLong,

    #[error("Unrecognized keyword at start of '{0}'.")]
    Unrecognized(String),

    #[error("Internal error.")]
    Internal,
}
