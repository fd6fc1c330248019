//! The address translation pipeline.
//!
//! [`Translator`] owns the TLB, the page table, physical memory and the backing store, and
//! resolves logical addresses one at a time:
//!
//! 1. **TLB hit**: the TLB knows the frame.
//! 2. **Page table hit**: the page table knows the frame; the mapping is copied into the TLB.
//! 3. **Page fault**: the page is loaded from the backing store into the next free frame and
//!    recorded in both the page table and the TLB.
//!
//! Each translation commits all of its state changes before it returns, so a page loaded for
//! one address is visible to the next.

use crate::{
    BackingStore, FrameNumber, LogicalAddress, MemoryError, PageTable, PhysicalAddress,
    PhysicalMemory, Statistics, Tlb,
};

/// How a translation found its frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// The TLB held the mapping.
    TlbHit,
    /// The TLB missed but the page table held the mapping.
    PageTableHit,
    /// Neither held it; the page was loaded from the backing store.
    PageFault,
}

/// The result of translating one logical address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Translation {
    /// The address that was translated.
    pub logical: LogicalAddress,
    /// Where it lives in physical memory.
    pub physical: PhysicalAddress,
    /// The byte stored there.
    pub value: u8,
    /// Which stage of the pipeline supplied the frame.
    pub resolution: Resolution,
}

impl Translation {
    /// Returns the byte reinterpreted as signed, as the report prints it.
    pub const fn signed_value(&self) -> i8 {
        self.value as i8
    }
}

/// Drives logical addresses through the TLB, the page table and demand paging.
pub struct Translator<S> {
    tlb: Tlb,
    page_table: PageTable,
    memory: PhysicalMemory,
    store: S,
    statistics: Statistics,
}

impl<S: BackingStore> Translator<S> {
    /// Creates a translator with an empty TLB, page table and physical memory.
    pub fn new(store: S) -> Self {
        Self {
            tlb: Tlb::new(),
            page_table: PageTable::new(),
            memory: PhysicalMemory::new(),
            store,
            statistics: Statistics::default(),
        }
    }

    /// Translates a single logical address.
    ///
    /// If the page cannot be loaded, nothing is counted and no lookup structure changes.
    pub fn translate(&mut self, logical: LogicalAddress) -> Result<Translation, MemoryError> {
        let (page, offset) = logical.split();

        let (frame, resolution) = if let Some(frame) = self.tlb.lookup(page) {
            (frame, Resolution::TlbHit)
        } else if let Some(frame) = self.page_table.lookup(page) {
            log::trace!("page {} found in page table (frame {})", page, frame);
            self.tlb.insert(page, frame);
            (frame, Resolution::PageTableHit)
        } else {
            let frame = self.memory.allocate_and_load(page, &mut self.store)?;
            log::debug!("page fault: page {} loaded into frame {}", page, frame);
            self.page_table.insert(page, frame);
            self.tlb.insert(page, frame);
            (frame, Resolution::PageFault)
        };

        let physical = PhysicalMemory::physical_address(frame, offset);
        let value = self.memory.read_byte(frame, offset)?;

        self.statistics.addresses += 1;
        match resolution {
            Resolution::TlbHit => self.statistics.tlb_hits += 1,
            Resolution::PageFault => self.statistics.page_faults += 1,
            Resolution::PageTableHit => {}
        }

        Ok(Translation {
            logical,
            physical,
            value,
            resolution,
        })
    }

    /// Translates every address in `addresses`, handing each result to `sink` as it is
    /// produced.
    ///
    /// Stops at the first error; translations already passed to `sink` stay valid.
    pub fn run<I, F>(&mut self, addresses: I, mut sink: F) -> Result<Statistics, MemoryError>
    where
        I: IntoIterator<Item = LogicalAddress>,
        F: FnMut(&Translation),
    {
        for logical in addresses {
            let translation = self.translate(logical).inspect_err(|err| {
                log::error!("translation of {} failed: {}", logical, err);
            })?;
            sink(&translation);
        }

        log::debug!(
            "translated {} addresses: {} page faults, {} TLB hits",
            self.statistics.addresses,
            self.statistics.page_faults,
            self.statistics.tlb_hits
        );
        Ok(self.statistics)
    }

    /// Returns the frame currently backing `logical`'s page without changing any state.
    pub fn resident_frame(&self, logical: LogicalAddress) -> Option<FrameNumber> {
        let page = logical.page_number();
        self.tlb.lookup(page).or_else(|| self.page_table.lookup(page))
    }
}

impl<S> Translator<S> {
    /// Returns the counters accumulated so far.
    pub fn statistics(&self) -> Statistics {
        self.statistics
    }

    /// Returns the TLB.
    pub fn tlb(&self) -> &Tlb {
        &self.tlb
    }

    /// Returns the page table.
    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    /// Returns physical memory.
    pub fn memory(&self) -> &PhysicalMemory {
        &self.memory
    }

    /// Consumes the translator, returning its backing store.
    pub fn into_store(self) -> S {
        self.store
    }
}
