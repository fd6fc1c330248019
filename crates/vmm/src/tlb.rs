//! Translation lookaside buffer.
//!
//! A small fully-associative cache of page → frame mappings that sits in front of the page
//! table. Replacement is first-in first-out: every entry is tagged with a sequence number when
//! it is inserted, and when the buffer is full the entry with the smallest tag is replaced.
//! Lookups never touch the tags, so a frequently used entry is evicted just as early as an
//! unused one.

use core::fmt;

use crate::{FrameNumber, PageNumber, layout};

/// Number of slots in the TLB.
const ENTRY_COUNT: usize = layout::TLB_ENTRIES;

/// A single occupied TLB slot.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TlbEntry {
    page: PageNumber,
    frame: FrameNumber,
    sequence: u64,
}

impl TlbEntry {
    /// Returns the cached page number.
    pub const fn page(&self) -> PageNumber {
        self.page
    }

    /// Returns the frame the page is mapped to.
    pub const fn frame(&self) -> FrameNumber {
        self.frame
    }

    /// Returns the insertion sequence number; lower numbers were inserted earlier.
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }
}

impl fmt::Debug for TlbEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TlbEntry({} -> {} #{})",
            self.page, self.frame, self.sequence
        )
    }
}

/// Fully-associative TLB with FIFO replacement.
#[derive(Debug)]
pub struct Tlb {
    slots: [Option<TlbEntry>; ENTRY_COUNT],
    /// Sequence number handed to the next inserted entry.
    next_sequence: u64,
}

impl Tlb {
    /// Creates an empty TLB.
    pub const fn new() -> Self {
        Self {
            slots: [None; ENTRY_COUNT],
            next_sequence: 0,
        }
    }

    /// Returns the frame cached for `page`, if any.
    pub fn lookup(&self, page: PageNumber) -> Option<FrameNumber> {
        self.iter()
            .find(|entry| entry.page == page)
            .map(|entry| entry.frame)
    }

    /// Returns true if `page` has a cached mapping.
    pub fn contains(&self, page: PageNumber) -> bool {
        self.lookup(page).is_some()
    }

    /// Caches the mapping `page` → `frame`.
    ///
    /// Inserting a page that is already cached does nothing, not even consuming a sequence
    /// number. Otherwise the lowest free slot is used, or, when every slot is occupied, the
    /// oldest entry is replaced and returned.
    pub fn insert(&mut self, page: PageNumber, frame: FrameNumber) -> Option<TlbEntry> {
        if self.contains(page) {
            return None;
        }

        let index = self.victim_index();
        let evicted = self.slots[index].replace(TlbEntry {
            page,
            frame,
            sequence: self.next_sequence,
        });
        self.next_sequence += 1;

        if let Some(old) = &evicted {
            log::trace!(
                "TLB slot {} evicted page {} (frame {}) for page {}",
                index,
                old.page,
                old.frame,
                page
            );
        }

        evicted
    }

    /// Returns the slot the next new entry goes into.
    fn victim_index(&self) -> usize {
        if let Some(free) = self.slots.iter().position(Option::is_none) {
            return free;
        }

        let mut oldest = 0;
        let mut oldest_sequence = u64::MAX;
        for (index, slot) in self.slots.iter().enumerate() {
            if let Some(entry) = slot {
                if entry.sequence < oldest_sequence {
                    oldest = index;
                    oldest_sequence = entry.sequence;
                }
            }
        }
        oldest
    }

    /// Returns an iterator over the occupied slots, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &TlbEntry> {
        self.slots.iter().filter_map(|slot| slot.as_ref())
    }

    /// Returns the number of occupied slots.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns true if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Returns the number of slots.
    pub const fn capacity(&self) -> usize {
        ENTRY_COUNT
    }

    /// Returns the sequence number the next inserted entry will receive.
    pub const fn sequence(&self) -> u64 {
        self.next_sequence
    }
}

impl Default for Tlb {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(n: usize) -> PageNumber {
        PageNumber::new(n)
    }

    fn frame(n: usize) -> FrameNumber {
        FrameNumber::new(n)
    }

    fn cached_pages(tlb: &Tlb) -> Vec<usize> {
        let mut pages: Vec<usize> = tlb.iter().map(|entry| entry.page().as_usize()).collect();
        pages.sort_unstable();
        pages
    }

    #[test]
    fn starts_empty() {
        let tlb = Tlb::new();
        assert!(tlb.is_empty());
        assert_eq!(tlb.len(), 0);
        assert_eq!(tlb.capacity(), 16);
        assert_eq!(tlb.lookup(page(0)), None);
    }

    #[test]
    fn lookup_returns_the_frame() {
        let mut tlb = Tlb::new();
        tlb.insert(page(9), frame(4));

        assert_eq!(tlb.lookup(page(9)), Some(frame(4)));
        assert_eq!(tlb.lookup(page(4)), None);
    }

    #[test]
    fn fills_lowest_free_slot_first() {
        let mut tlb = Tlb::new();
        for n in 0..16 {
            assert_eq!(tlb.insert(page(n + 100), frame(n)), None);
        }

        let slot_pages: Vec<usize> = tlb.iter().map(|e| e.page().as_usize()).collect();
        assert_eq!(slot_pages, (100..116).collect::<Vec<_>>());
        assert_eq!(tlb.len(), 16);
    }

    #[test]
    fn seventeenth_insert_evicts_the_first() {
        let mut tlb = Tlb::new();
        for n in 0..16 {
            tlb.insert(page(n), frame(n));
        }

        let evicted = tlb.insert(page(16), frame(16)).expect("full TLB must evict");
        assert_eq!(evicted.page(), page(0));
        assert_eq!(evicted.frame(), frame(0));

        assert_eq!(cached_pages(&tlb), (1..17).collect::<Vec<_>>());
        assert_eq!(tlb.lookup(page(0)), None);
        assert_eq!(tlb.lookup(page(16)), Some(frame(16)));
    }

    #[test]
    fn eviction_order_matches_insertion_order() {
        let mut tlb = Tlb::new();
        let inserted: Vec<usize> = (0..48).map(|n| (n * 37) % 251).collect();

        let mut evictions = Vec::new();
        for (i, &p) in inserted.iter().enumerate() {
            if let Some(old) = tlb.insert(page(p), frame(i)) {
                evictions.push(old.page().as_usize());
            }
        }

        assert_eq!(evictions, inserted[..32].to_vec());
        let mut expected = inserted[32..].to_vec();
        expected.sort_unstable();
        assert_eq!(cached_pages(&tlb), expected);
    }

    #[test]
    fn reinsert_is_a_no_op() {
        let mut tlb = Tlb::new();
        tlb.insert(page(1), frame(1));
        tlb.insert(page(2), frame(2));
        let before: Vec<TlbEntry> = tlb.iter().copied().collect();
        let sequence = tlb.sequence();

        assert_eq!(tlb.insert(page(1), frame(99)), None);

        let after: Vec<TlbEntry> = tlb.iter().copied().collect();
        assert_eq!(before, after);
        assert_eq!(tlb.sequence(), sequence);
        assert_eq!(tlb.lookup(page(1)), Some(frame(1)));
    }

    #[test]
    fn reinsert_does_not_refresh_age() {
        let mut tlb = Tlb::new();
        for n in 0..16 {
            tlb.insert(page(n), frame(n));
        }
        // Touching page 0 again must not protect it from being the next victim.
        tlb.insert(page(0), frame(0));
        assert_eq!(tlb.lookup(page(0)), Some(frame(0)));

        let evicted = tlb.insert(page(20), frame(20)).map(|e| e.page());
        assert_eq!(evicted, Some(page(0)));
    }

    #[test]
    fn pages_stay_unique() {
        let mut tlb = Tlb::new();
        for n in 0..64 {
            tlb.insert(page(n % 20), frame(n % 20));
        }
        let pages = cached_pages(&tlb);
        let mut deduped = pages.clone();
        deduped.dedup();
        assert_eq!(pages, deduped);
    }
}
