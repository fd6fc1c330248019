//! Single-level page table.

use alloc::boxed::Box;

use crate::{FrameNumber, PageNumber, layout};

/// Number of entries in the page table, one per logical page.
const ENTRY_COUNT: usize = layout::PAGE_COUNT;

/// Maps logical page numbers to the physical frames holding them.
///
/// An absent entry means the page has never been loaded; looking it up is a page fault.
/// Entries are only ever filled in, never cleared, since the simulated workload fits in
/// physical memory.
///
/// Page numbers outside the table are not errors: lookups report them as absent and inserts
/// ignore them.
pub struct PageTable {
    /// The entries in this page table.
    entries: Box<[Option<FrameNumber>; ENTRY_COUNT]>,
}

impl PageTable {
    /// Creates a new, empty page table.
    pub fn new() -> Self {
        Self {
            entries: Box::new([None; ENTRY_COUNT]),
        }
    }

    /// Returns the frame mapped for `page`, if any.
    pub fn lookup(&self, page: PageNumber) -> Option<FrameNumber> {
        self.entries.get(page.as_usize()).copied().flatten()
    }

    /// Maps `page` to `frame`.
    ///
    /// Out-of-range pages are ignored.
    pub fn insert(&mut self, page: PageNumber, frame: FrameNumber) {
        if let Some(entry) = self.entries.get_mut(page.as_usize()) {
            if let Some(previous) = entry.replace(frame) {
                log::warn!("page {} remapped from frame {} to {}", page, previous, frame);
            }
        }
    }

    /// Returns the number of pages currently mapped.
    pub fn mapped_pages(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_some()).count()
    }

    /// Returns the number of entries in this page table.
    pub const fn len(&self) -> usize {
        ENTRY_COUNT
    }
}

impl Default for PageTable {
    fn default() -> Self {
        Self::new()
    }
}
