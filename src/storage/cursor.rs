use crate::storage::table::Table;
use crate::types::RowNum;

/// A position in a table expressed as a row index, resolvable to a byte
/// range inside a page buffer via [`Table::row_slice`].
#[derive(Debug, Clone)]
pub struct Cursor {
    row_num: RowNum,
    end_of_table: bool,
}

impl Cursor {
    /// Positioned on the first row, or already at the end for an empty
    /// table.
    pub fn start(table: &Table) -> Self {
        Self {
            row_num: 0,
            end_of_table: table.num_rows == 0,
        }
    }

    /// Positioned one past the last row; where the next insert lands.
    pub fn end(table: &Table) -> Self {
        Self {
            row_num: table.num_rows,
            end_of_table: true,
        }
    }

    pub fn row_num(&self) -> RowNum {
        self.row_num
    }

    pub fn at_end(&self) -> bool {
        self.end_of_table
    }

    pub fn advance(&mut self, table: &Table) {
        self.row_num += 1;
        if self.row_num >= table.num_rows {
            self.end_of_table = true;
        }
    }
}
