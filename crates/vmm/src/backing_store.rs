//! Backing store access.
//!
//! The backing store holds the contents of every logical page, laid out back to back: page
//! `n` occupies bytes `n * PAGE_SIZE .. (n + 1) * PAGE_SIZE`. Page faults are serviced by
//! reading one such block.

use alloc::vec::Vec;
use core::fmt;

use crate::{PageNumber, layout::PAGE_SIZE};

/// Errors that can occur while reading a page from the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadError {
    /// The backing store could not be opened.
    MissingBackingStore,
    /// The backing store is available but does not hold a full block for this page.
    PageUnavailable(PageNumber),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBackingStore => write!(f, "backing store could not be opened"),
            Self::PageUnavailable(page) => {
                write!(f, "page {} could not be read from the backing store", page)
            }
        }
    }
}

impl core::error::Error for LoadError {}

/// Random-access source of page contents.
pub trait BackingStore {
    /// Reads the `PAGE_SIZE`-byte block holding `page`.
    fn read_page(&mut self, page: PageNumber) -> Result<[u8; PAGE_SIZE], LoadError>;
}

impl<S: BackingStore + ?Sized> BackingStore for &mut S {
    fn read_page(&mut self, page: PageNumber) -> Result<[u8; PAGE_SIZE], LoadError> {
        (**self).read_page(page)
    }
}

/// A backing store held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackingStore {
    data: Vec<u8>,
}

impl InMemoryBackingStore {
    /// Wraps the given bytes as a backing store.
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Returns the size of the store in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Returns the number of complete pages held by the store.
    pub fn page_count(&self) -> usize {
        self.data.len() / PAGE_SIZE
    }
}

impl From<Vec<u8>> for InMemoryBackingStore {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl BackingStore for InMemoryBackingStore {
    fn read_page(&mut self, page: PageNumber) -> Result<[u8; PAGE_SIZE], LoadError> {
        let start = page
            .as_usize()
            .checked_mul(PAGE_SIZE)
            .ok_or(LoadError::PageUnavailable(page))?;
        let block = self
            .data
            .get(start..start.saturating_add(PAGE_SIZE))
            .ok_or(LoadError::PageUnavailable(page))?;

        let mut buffer = [0u8; PAGE_SIZE];
        buffer.copy_from_slice(block);
        Ok(buffer)
    }
}

#[cfg(any(test, feature = "std"))]
pub use file::FileBackingStore;

#[cfg(any(test, feature = "std"))]
mod file {
    use std::fs::File;
    use std::io::{Read, Seek, SeekFrom};
    use std::path::{Path, PathBuf};

    use super::{BackingStore, LoadError};
    use crate::{PageNumber, layout::PAGE_SIZE};

    /// A backing store read from a file on disk.
    ///
    /// The file is opened once, up front; every page fault seeks to the page's block and
    /// reads it. A missing file is reported by [`FileBackingStore::open`], before any address
    /// is translated.
    #[derive(Debug)]
    pub struct FileBackingStore {
        path: PathBuf,
        file: File,
    }

    impl FileBackingStore {
        /// Opens the backing store at `path`.
        pub fn open(path: impl AsRef<Path>) -> Result<Self, LoadError> {
            let path = path.as_ref();
            let file = File::open(path).map_err(|err| {
                log::error!("cannot open backing store {}: {}", path.display(), err);
                LoadError::MissingBackingStore
            })?;

            log::debug!("opened backing store {}", path.display());
            Ok(Self {
                path: path.to_path_buf(),
                file,
            })
        }

        /// Returns the path this store was opened from.
        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl BackingStore for FileBackingStore {
        fn read_page(&mut self, page: PageNumber) -> Result<[u8; PAGE_SIZE], LoadError> {
            let mut buffer = [0u8; PAGE_SIZE];
            self.file
                .seek(SeekFrom::Start(page.store_offset() as u64))
                .and_then(|_| self.file.read_exact(&mut buffer))
                .map_err(|err| {
                    log::error!(
                        "cannot read page {} from {}: {}",
                        page,
                        self.path.display(),
                        err
                    );
                    LoadError::PageUnavailable(page)
                })?;
            Ok(buffer)
        }
    }
}
