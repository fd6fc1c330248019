#![cfg_attr(not(any(test, feature = "std")), no_std)]

//! # Virtual Memory Manager (VMM)
//!
//! The Virtual Memory Manager (VMM) models the address translation path of a demand-paged
//! memory system. It provides:
//!
//! - Splitting 16-bit logical addresses into page numbers and offsets.
//! - A 256-entry page table and a 16-entry fully-associative TLB with FIFO replacement.
//! - A physical memory of 256 frames, filled on demand from a backing store.
//! - A [`Translator`] that drives the whole pipeline and tallies faults and TLB hits.
//!
//! The core is `no_std` (with `alloc`). The `std` feature adds file-backed adapters for the
//! backing store and the address list.

extern crate alloc;

mod address;
#[cfg(any(test, feature = "std"))]
mod address_source;
mod backing_store;
pub mod layout;
mod numbers;
mod page_table;
mod percentage;
mod physical_memory;
mod statistics;
mod tlb;
mod translator;

pub use address::{LogicalAddress, PhysicalAddress};
#[cfg(any(test, feature = "std"))]
pub use address_source::AddressSource;
#[cfg(any(test, feature = "std"))]
pub use backing_store::FileBackingStore;
pub use backing_store::{BackingStore, InMemoryBackingStore, LoadError};
pub use numbers::{FrameNumber, Offset, PageNumber};
pub use page_table::PageTable;
pub use percentage::Percentage;
pub use physical_memory::{MemoryError, PhysicalMemory};
pub use statistics::Statistics;
pub use tlb::{Tlb, TlbEntry};
pub use translator::{Resolution, Translation, Translator};

pub use layout::PAGE_SIZE;
