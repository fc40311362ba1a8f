use thiserror::Error;

use crate::types::PageNum;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tried to fetch page number out of bounds: {page} >= {max}")]
    PageOutOfBounds { page: PageNum, max: usize },

    #[error("Tried to flush an uncached page (page {page})")]
    FlushUncachedPage { page: PageNum },

    #[error("Row of {row_size} bytes does not fit in a {page_size}-byte page (table '{table}')")]
    RowTooLarge {
        table: String,
        row_size: usize,
        page_size: usize,
    },

    #[error("Unknown column type: {0}")]
    UnknownColumnType(String),

    #[error("Malformed schema file: {reason}")]
    SchemaFormat { reason: String },
}

pub type Result<T> = std::result::Result<T, DbError>;
