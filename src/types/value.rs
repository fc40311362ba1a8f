use crate::types::error::DbError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Varchar,
    Real,
}

impl ColumnType {
    /// Parse a type name as it appears in the schema file.
    pub fn parse(name: &str) -> Result<Self, DbError> {
        match name {
            "int" => Ok(ColumnType::Integer),
            "varchar" => Ok(ColumnType::Varchar),
            "real" => Ok(ColumnType::Real),
            other => Err(DbError::UnknownColumnType(other.to_string())),
        }
    }
}

/// A typed, fixed-width column: byte width and offset from row start.
/// Within a table, offsets are the prefix sum of sizes in declaration
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub name: String,
    pub column_type: ColumnType,
    pub size: usize,
    pub offset: usize,
}

/// Width rule for REAL columns: 8 bytes and up holds an f64, anything
/// narrower holds an f32. The declared column size drives the on-disk
/// representation.
pub fn real_is_wide(size: usize) -> bool {
    size >= 8
}

pub fn decode_integer(bytes: &[u8]) -> i32 {
    let mut buf = [0u8; 4];
    let len = bytes.len().min(4);
    buf[..len].copy_from_slice(&bytes[..len]);
    i32::from_le_bytes(buf)
}

pub fn encode_integer(value: i32, size: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; size];
    let le = value.to_le_bytes();
    let len = size.min(4);
    bytes[..len].copy_from_slice(&le[..len]);
    bytes
}

pub fn decode_real(bytes: &[u8]) -> f64 {
    if real_is_wide(bytes.len()) {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&bytes[..8]);
        f64::from_le_bytes(buf)
    } else {
        let mut buf = [0u8; 4];
        let len = bytes.len().min(4);
        buf[..len].copy_from_slice(&bytes[..len]);
        f32::from_le_bytes(buf) as f64
    }
}

pub fn encode_real(value: f64, size: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; size];
    if real_is_wide(size) {
        bytes[..8].copy_from_slice(&value.to_le_bytes());
    } else {
        let le = (value as f32).to_le_bytes();
        let len = size.min(4);
        bytes[..len].copy_from_slice(&le[..len]);
    }
    bytes
}

/// The occupied prefix of a fixed-width text field: everything up to
/// its first NUL byte.
pub fn text_prefix(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&b| b == 0) {
        Some(nul) => &bytes[..nul],
        None => bytes,
    }
}

/// Copy text into a `size`-wide buffer, NUL padded. Input longer than
/// the field is cut off at the field width.
pub fn encode_text(text: &str, size: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; size];
    let raw = text.as_bytes();
    let len = raw.len().min(size);
    bytes[..len].copy_from_slice(&raw[..len]);
    bytes
}
