use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::storage::schema::Schema;
use crate::types::error::Result;

/// Schema file used by most fixtures: the classic three-column user
/// table (row size 291, 14 rows per page).
pub const USERS_SCHEMA: &str = "1\nusers;3;id:4:int,username:32:varchar,email:255:varchar\n";

/// A schema file plus an isolated data directory, both removed on drop.
pub struct TempSchema {
    dir: TempDir,
    pub schema_path: PathBuf,
}

impl TempSchema {
    pub fn new(contents: &str) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let schema_path = dir.path().join("schema.txt");
        fs::write(&schema_path, contents).expect("write schema file");
        Self { dir, schema_path }
    }

    pub fn users() -> Self {
        Self::new(USERS_SCHEMA)
    }

    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    /// Open (or reopen) the schema against this fixture's data
    /// directory.
    pub fn open(&self) -> Result<Schema> {
        Schema::open_in(&self.schema_path, &self.data_dir())
    }
}
