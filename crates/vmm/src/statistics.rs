//! Counters collected while translating an address stream.

use core::fmt;

use crate::Percentage;

/// Totals for one run of the translation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Statistics {
    /// Number of addresses translated.
    pub addresses: usize,
    /// Number of translations that had to load a page from the backing store.
    pub page_faults: usize,
    /// Number of translations resolved by the TLB.
    pub tlb_hits: usize,
}

impl Statistics {
    /// Returns the page faults as a share of all translated addresses.
    pub const fn fault_rate(&self) -> Percentage {
        Percentage::new(self.page_faults, self.addresses)
    }

    /// Returns the TLB hits as a share of all translated addresses.
    pub const fn hit_rate(&self) -> Percentage {
        Percentage::new(self.tlb_hits, self.addresses)
    }

    /// Returns the number of translations resolved by the page table.
    ///
    /// Counters that do not add up (more faults and hits than addresses) yield 0.
    pub const fn page_table_hits(&self) -> usize {
        self.addresses
            .saturating_sub(self.page_faults)
            .saturating_sub(self.tlb_hits)
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Number of page faults: {}/{} ({})",
            self.page_faults,
            self.addresses,
            self.fault_rate()
        )?;
        write!(
            f,
            "TLB hit rate: {}/{} ({})",
            self.tlb_hits,
            self.addresses,
            self.hit_rate()
        )
    }
}
