use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use tracing::debug;

use crate::types::error::{DbError, Result};
use crate::types::{PageNum, PAGE_SIZE, TABLE_MAX_PAGES};

/// Demand-loaded page cache over one backing file. A slot is populated
/// on the first touch of its page index and then owns a buffer of
/// exactly `PAGE_SIZE` bytes until the pager closes.
pub struct Pager {
    file: File,
    file_length: u64,
    pages: Vec<Option<Box<[u8]>>>,
}

impl Pager {
    /// Open the backing file read/write, creating it (mode 0600) and its
    /// parent directory if absent.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }

        let mut options = OpenOptions::new();
        options.read(true).write(true).create(true).truncate(false);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(path)?;

        let file_length = file.seek(SeekFrom::End(0))?;
        debug!(path = %path.display(), file_length, "opened backing file");

        Ok(Self {
            file,
            file_length,
            pages: (0..TABLE_MAX_PAGES).map(|_| None).collect(),
        })
    }

    pub fn file_length(&self) -> u64 {
        self.file_length
    }

    pub fn is_cached(&self, page_num: PageNum) -> bool {
        self.pages
            .get(page_num)
            .is_some_and(|slot| slot.is_some())
    }

    /// Fetch a page buffer, loading it from disk on a cache miss. A page
    /// at or beyond the end of the file comes back zero-initialized; a
    /// short read at end-of-file leaves the tail zeroed.
    pub fn get_page(&mut self, page_num: PageNum) -> Result<&mut [u8]> {
        if page_num >= TABLE_MAX_PAGES {
            return Err(DbError::PageOutOfBounds {
                page: page_num,
                max: TABLE_MAX_PAGES,
            });
        }

        let page = match self.pages[page_num].take() {
            Some(page) => page,
            None => {
                let mut page = vec![0u8; PAGE_SIZE].into_boxed_slice();

                let mut pages_on_disk = self.file_length as usize / PAGE_SIZE;
                if self.file_length as usize % PAGE_SIZE != 0 {
                    // A partial page may sit at the end of the file.
                    pages_on_disk += 1;
                }

                if page_num <= pages_on_disk {
                    self.file
                        .seek(SeekFrom::Start((page_num * PAGE_SIZE) as u64))?;
                    let bytes_read = self.file.read(&mut page)?;
                    debug!(page_num, bytes_read, "page cache miss");
                }

                page
            }
        };

        Ok(self.pages[page_num].insert(page))
    }

    /// Write exactly `size` bytes of a cached page at its file offset.
    pub fn flush(&mut self, page_num: PageNum, size: usize) -> Result<()> {
        let page = self
            .pages
            .get(page_num)
            .and_then(|slot| slot.as_ref())
            .ok_or(DbError::FlushUncachedPage { page: page_num })?;

        self.file
            .seek(SeekFrom::Start((page_num * PAGE_SIZE) as u64))?;
        self.file.write_all(&page[..size])?;
        debug!(page_num, size, "flushed page");

        Ok(())
    }

    /// Release one cached buffer.
    pub fn evict(&mut self, page_num: PageNum) {
        if let Some(slot) = self.pages.get_mut(page_num) {
            *slot = None;
        }
    }

    /// Set the backing file length so the at-rest layout matches the
    /// occupied row range exactly.
    pub fn truncate(&mut self, length: u64) -> Result<()> {
        self.file.set_len(length)?;
        self.file_length = length;
        Ok(())
    }

    /// Drop every remaining buffer and force file contents down.
    pub fn close(&mut self) -> Result<()> {
        for slot in &mut self.pages {
            *slot = None;
        }
        self.file.sync_all()?;
        Ok(())
    }
}
