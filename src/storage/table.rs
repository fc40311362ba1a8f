use std::path::{Path, PathBuf};

use tracing::debug;

use crate::storage::pager::Pager;
use crate::types::error::{DbError, Result};
use crate::types::row::Row;
use crate::types::value::ColumnDefinition;
use crate::types::{PageNum, RowNum, PAGE_SIZE, TABLE_MAX_PAGES};

/// A table as read from the schema file: column offsets not yet
/// assigned, no backing file opened.
#[derive(Debug, Clone)]
pub struct TableDescriptor {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
}

/// One table: its column layout, capacity figures, and backing pager.
pub struct Table {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
    pub row_size: usize,
    pub rows_per_page: usize,
    pub max_rows: usize,
    pub num_rows: usize,
    path: PathBuf,
    pager: Pager,
}

impl Table {
    /// Compute the row layout from the descriptor, open the backing file
    /// under `data_dir`, and infer the persisted row count from its
    /// length. The inference is exact because [`Table::close`] keeps the
    /// file at `full_pages * PAGE_SIZE + trailing_rows * row_size`.
    pub fn open(descriptor: TableDescriptor, data_dir: &Path) -> Result<Self> {
        let TableDescriptor { name, mut columns } = descriptor;

        let mut row_size = 0;
        for column in &mut columns {
            column.offset = row_size;
            row_size += column.size;
        }
        if row_size == 0 || row_size > PAGE_SIZE {
            return Err(DbError::RowTooLarge {
                table: name,
                row_size,
                page_size: PAGE_SIZE,
            });
        }

        let rows_per_page = PAGE_SIZE / row_size;
        let max_rows = rows_per_page * TABLE_MAX_PAGES;

        let path = data_dir.join(format!("{name}.table"));
        let pager = Pager::open(&path)?;

        let file_length = pager.file_length() as usize;
        let num_rows =
            (file_length / PAGE_SIZE) * rows_per_page + (file_length % PAGE_SIZE) / row_size;

        debug!(
            table = %name,
            row_size,
            rows_per_page,
            max_rows,
            num_rows,
            "opened table"
        );

        Ok(Self {
            name,
            columns,
            row_size,
            rows_per_page,
            max_rows,
            num_rows,
            path,
            pager,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn find_column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }

    pub fn column(&self, index: usize) -> &ColumnDefinition {
        &self.columns[index]
    }

    fn locate(&self, row_num: RowNum) -> (PageNum, usize) {
        let page_num = row_num / self.rows_per_page;
        let byte_offset = (row_num % self.rows_per_page) * self.row_size;
        (page_num, byte_offset)
    }

    /// Raw byte range of a row inside its (possibly freshly loaded)
    /// page.
    pub fn row_slice(&mut self, row_num: RowNum) -> Result<&mut [u8]> {
        let (page_num, byte_offset) = self.locate(row_num);
        let row_size = self.row_size;
        let page = self.pager.get_page(page_num)?;
        Ok(&mut page[byte_offset..byte_offset + row_size])
    }

    /// Deserialize one row into a fresh scratch buffer.
    pub fn read_row(&mut self, row_num: RowNum) -> Result<Row> {
        let (page_num, byte_offset) = self.locate(row_num);
        let row_size = self.row_size;
        let columns = &self.columns;
        let page = self.pager.get_page(page_num)?;
        Ok(Row::read_from(
            &page[byte_offset..byte_offset + row_size],
            columns,
            row_size,
        ))
    }

    /// Serialize a row image into its slot.
    pub fn write_row(&mut self, row_num: RowNum, row: &Row) -> Result<()> {
        let slot = self.row_slice(row_num)?;
        row.write_to(slot);
        Ok(())
    }

    /// Whether the raw row bytes are the all-zero hole pattern left by a
    /// delete.
    pub fn row_is_zeroed(&mut self, row_num: RowNum) -> Result<bool> {
        Ok(self.row_slice(row_num)?.iter().all(|&b| b == 0))
    }

    /// Flush the occupied prefix (full pages, then the partial page of
    /// trailing rows), shrink the file to the layout size, and release
    /// the page cache.
    pub fn close(&mut self) -> Result<()> {
        let num_full_pages = self.num_rows / self.rows_per_page;
        for page_num in 0..num_full_pages {
            if self.pager.is_cached(page_num) {
                self.pager.flush(page_num, PAGE_SIZE)?;
                self.pager.evict(page_num);
            }
        }

        let trailing_rows = self.num_rows % self.rows_per_page;
        if trailing_rows > 0 {
            let page_num = num_full_pages;
            if self.pager.is_cached(page_num) {
                self.pager.flush(page_num, trailing_rows * self.row_size)?;
                self.pager.evict(page_num);
            }
        }

        let file_length = (num_full_pages * PAGE_SIZE + trailing_rows * self.row_size) as u64;
        self.pager.truncate(file_length)?;
        self.pager.close()?;

        debug!(table = %self.name, num_rows = self.num_rows, file_length, "closed table");
        Ok(())
    }
}
