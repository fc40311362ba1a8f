pub mod error;
pub mod row;
pub mod value;

// Common type aliases
pub type PageNum = usize;
pub type RowNum = usize;

/// Unit of disk I/O: every cached buffer and every full on-disk page is
/// exactly this many bytes.
pub const PAGE_SIZE: usize = 4096;
/// Hard cap on pages per table; bounds the page cache slot array and,
/// together with the row width, the table capacity.
pub const TABLE_MAX_PAGES: usize = 100;
