//! Address types for logical and physical memory.
//!
//! This module provides wrappers around logical (virtual) and physical addresses, with the
//! page number / offset decomposition used by the translation pipeline.

use core::fmt;

use crate::{FrameNumber, Offset, PageNumber, layout};

/// A 16-bit logical address.
///
/// Logical addresses are supplied from outside the pipeline as wider integers; only the low
/// [`layout::ADDRESS_BITS`] bits are meaningful and anything above them is dropped on
/// construction.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct LogicalAddress(u16);

impl LogicalAddress {
    /// Creates a logical address, truncating `raw` to its low 16 bits.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self((raw as usize & layout::ADDRESS_MASK) as u16)
    }

    /// Builds the address of `offset` within `page`.
    ///
    /// Out-of-range components are truncated the same way [`LogicalAddress::new`] does.
    #[inline]
    pub const fn from_parts(page: PageNumber, offset: Offset) -> Self {
        let raw = (page.as_usize() << layout::OFFSET_BITS)
            | (offset.as_usize() & layout::OFFSET_MASK);
        Self((raw & layout::ADDRESS_MASK) as u16)
    }

    /// Splits this address into its page number (bits 15..8) and offset (bits 7..0).
    #[inline]
    pub const fn split(self) -> (PageNumber, Offset) {
        (self.page_number(), self.offset())
    }

    /// Returns the page number (bits 15..8).
    #[inline]
    pub const fn page_number(self) -> PageNumber {
        PageNumber::new(layout::page_index(self.0 as usize))
    }

    /// Returns the offset within the page (bits 7..0).
    #[inline]
    pub const fn offset(self) -> Offset {
        Offset::new(layout::page_offset(self.0 as usize))
    }

    /// Returns the raw 16-bit value.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Returns the raw value as a usize.
    #[inline]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u16> for LogicalAddress {
    #[inline]
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<u32> for LogicalAddress {
    #[inline]
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for LogicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LogicalAddress({:#06x})", self.0)
    }
}

impl fmt::Display for LogicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A physical address: `frame * PAGE_SIZE + offset`.
///
/// Physical addresses are always derived from a frame and an offset; they are never stored
/// by the pipeline.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PhysicalAddress(usize);

impl PhysicalAddress {
    /// Creates a new physical address.
    #[inline]
    pub const fn new(addr: usize) -> Self {
        Self(addr)
    }

    /// Computes the physical address of `offset` within `frame`.
    #[inline]
    pub const fn from_parts(frame: FrameNumber, offset: Offset) -> Self {
        Self(frame.as_usize() * layout::PAGE_SIZE + offset.as_usize())
    }

    /// Returns the raw address value.
    #[inline]
    pub const fn as_usize(self) -> usize {
        self.0
    }

    /// Returns the frame number containing this address.
    #[inline]
    pub const fn frame_number(self) -> FrameNumber {
        FrameNumber::new(self.0 / layout::PAGE_SIZE)
    }

    /// Returns the offset of this address within its frame.
    #[inline]
    pub const fn offset(self) -> Offset {
        Offset::new(self.0 % layout::PAGE_SIZE)
    }
}

impl fmt::Debug for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PhysicalAddress({:#x})", self.0)
    }
}

impl fmt::Display for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
