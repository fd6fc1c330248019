//! Geometry of the simulated machine.
//!
//! The simulated machine is deliberately tiny:
//! - 16-bit logical addresses
//! - 8-bit page number and 8-bit page offset (256-byte pages)
//! - a single-level page table with 256 entries
//! - 256 physical frames, so every page fits in memory at once
//! - a 16-entry TLB
//!
//! Address layout:
//! - Bits 0-7: Page offset
//! - Bits 8-15: Page number

/// Number of bits in a logical address.
pub const ADDRESS_BITS: u32 = 16;

/// Number of bits in the page offset.
pub const OFFSET_BITS: u32 = 8;

/// Page (and frame) size in bytes (256 bytes = 2^8).
pub const PAGE_SIZE: usize = 1 << OFFSET_BITS;

/// Number of pages in the logical address space.
pub const PAGE_COUNT: usize = 1 << (ADDRESS_BITS - OFFSET_BITS);

/// Number of frames in physical memory.
pub const FRAME_COUNT: usize = 256;

/// Number of entries in the TLB.
pub const TLB_ENTRIES: usize = 16;

/// Mask selecting the bits of a logical address.
pub const ADDRESS_MASK: usize = (1 << ADDRESS_BITS) - 1;

/// Mask selecting the page offset bits.
pub const OFFSET_MASK: usize = (1 << OFFSET_BITS) - 1;

/// Size in bytes a backing store needs to hold every page.
pub const BACKING_STORE_SIZE: usize = PAGE_COUNT * PAGE_SIZE;

/// Returns the page index for a raw address.
///
/// Bits above [`ADDRESS_BITS`] are discarded first.
#[inline]
pub const fn page_index(address: usize) -> usize {
    (address & ADDRESS_MASK) >> OFFSET_BITS
}

/// Returns the offset within the page for a raw address.
#[inline]
pub const fn page_offset(address: usize) -> usize {
    address & OFFSET_MASK
}
