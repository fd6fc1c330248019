//! Emulated physical memory.
//!
//! Physical memory is a fixed array of `FRAME_COUNT` frames, each `PAGE_SIZE` bytes. Frames
//! are handed out by a bump allocator: the first fault gets frame 0, the next frame 1, and so
//! on. A frame is written once, when the page it holds is loaded, and is never freed or
//! reused. Running out of frames is reported as [`MemoryError::CapacityExceeded`].

use alloc::{boxed::Box, vec};
use core::fmt;

use crate::{
    BackingStore, FrameNumber, LoadError, Offset, PageNumber, PhysicalAddress,
    layout::{FRAME_COUNT, PAGE_SIZE},
};

/// Errors that can occur while loading pages into, or reading from, physical memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryError {
    /// Every frame is already allocated.
    CapacityExceeded,
    /// The frame or offset does not exist, or the frame has not been loaded.
    OutOfRange,
    /// The backing store could not supply the page.
    Load(LoadError),
}

impl From<LoadError> for MemoryError {
    fn from(err: LoadError) -> Self {
        Self::Load(err)
    }
}

impl fmt::Display for MemoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded => {
                write!(f, "physical memory is full ({} frames)", FRAME_COUNT)
            }
            Self::OutOfRange => write!(f, "frame or offset out of range"),
            Self::Load(err) => write!(f, "page load failed: {}", err),
        }
    }
}

impl core::error::Error for MemoryError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Load(err) => Some(err),
            _ => None,
        }
    }
}

/// Emulated physical memory with a monotonic frame allocator.
pub struct PhysicalMemory {
    /// Frame contents.
    frames: Box<[[u8; PAGE_SIZE]]>,
    /// The page loaded into each frame, or `None` while the frame is unallocated.
    owners: [Option<PageNumber>; FRAME_COUNT],
    /// Next frame to hand out.
    next_free: FrameNumber,
}

impl PhysicalMemory {
    /// Creates physical memory with every frame unallocated.
    pub fn new() -> Self {
        Self {
            frames: vec![[0u8; PAGE_SIZE]; FRAME_COUNT].into_boxed_slice(),
            owners: [None; FRAME_COUNT],
            next_free: FrameNumber::new(0),
        }
    }

    /// Loads `page` from `store` into the next free frame and returns that frame.
    ///
    /// Capacity is checked before the store is read. If the store fails, no frame is
    /// consumed.
    pub fn allocate_and_load<S>(
        &mut self,
        page: PageNumber,
        store: &mut S,
    ) -> Result<FrameNumber, MemoryError>
    where
        S: BackingStore + ?Sized,
    {
        let frame = self.next_free;
        if !frame.is_valid() {
            log::error!("no free frame for page {}", page);
            return Err(MemoryError::CapacityExceeded);
        }

        let contents = store.read_page(page)?;

        let index = frame.as_usize();
        self.frames[index] = contents;
        self.owners[index] = Some(page);
        self.next_free = frame + 1;

        Ok(frame)
    }

    /// Reads the byte at `offset` within `frame`.
    pub fn read_byte(&self, frame: FrameNumber, offset: Offset) -> Result<u8, MemoryError> {
        self.frame(frame)
            .and_then(|bytes| bytes.get(offset.as_usize()))
            .copied()
            .ok_or(MemoryError::OutOfRange)
    }

    /// Reads the byte at a physical address.
    pub fn read_physical(&self, address: PhysicalAddress) -> Result<u8, MemoryError> {
        self.read_byte(address.frame_number(), address.offset())
    }

    /// Computes the physical address of `offset` within `frame`.
    #[inline]
    pub const fn physical_address(frame: FrameNumber, offset: Offset) -> PhysicalAddress {
        PhysicalAddress::from_parts(frame, offset)
    }

    /// Returns the contents of an allocated frame.
    pub fn frame(&self, frame: FrameNumber) -> Option<&[u8; PAGE_SIZE]> {
        if self.is_allocated(frame) {
            self.frames.get(frame.as_usize())
        } else {
            None
        }
    }

    /// Returns the page loaded into `frame`, if it is allocated.
    pub fn owner(&self, frame: FrameNumber) -> Option<PageNumber> {
        self.owners.get(frame.as_usize()).copied().flatten()
    }

    /// Returns true if `frame` has been allocated.
    pub fn is_allocated(&self, frame: FrameNumber) -> bool {
        self.owner(frame).is_some()
    }

    /// Returns the total number of frames.
    pub const fn total_frames(&self) -> usize {
        FRAME_COUNT
    }

    /// Returns the number of allocated frames.
    pub const fn allocated_frames(&self) -> usize {
        self.next_free.as_usize()
    }

    /// Returns the number of frames still available.
    pub const fn free_frames(&self) -> usize {
        FRAME_COUNT - self.next_free.as_usize()
    }
}

impl Default for PhysicalMemory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryBackingStore;

    /// Store where byte `i` of page `p` is `(p + i) as u8`.
    fn patterned_store() -> InMemoryBackingStore {
        let data = (0..crate::layout::PAGE_COUNT)
            .flat_map(|page| (0..PAGE_SIZE).map(move |i| (page + i) as u8))
            .collect();
        InMemoryBackingStore::new(data)
    }

    /// Store that always fails.
    struct MissingStore;

    impl BackingStore for MissingStore {
        fn read_page(&mut self, _page: PageNumber) -> Result<[u8; PAGE_SIZE], LoadError> {
            Err(LoadError::MissingBackingStore)
        }
    }

    #[test]
    fn starts_unallocated() {
        let memory = PhysicalMemory::new();
        assert_eq!(memory.total_frames(), 256);
        assert_eq!(memory.allocated_frames(), 0);
        assert_eq!(memory.free_frames(), 256);
        assert!(!memory.is_allocated(FrameNumber::new(0)));
    }

    #[test]
    fn frames_are_assigned_in_order() {
        let mut memory = PhysicalMemory::new();
        let mut store = patterned_store();

        for (expected, page) in [200, 3, 77, 0].into_iter().enumerate() {
            let frame = memory
                .allocate_and_load(PageNumber::new(page), &mut store)
                .unwrap();
            assert_eq!(frame, FrameNumber::new(expected));
            assert_eq!(memory.owner(frame), Some(PageNumber::new(page)));
        }
        assert_eq!(memory.allocated_frames(), 4);
        assert_eq!(memory.free_frames(), 252);
    }

    #[test]
    fn reads_back_loaded_bytes() {
        let mut memory = PhysicalMemory::new();
        let mut store = patterned_store();

        let frame = memory
            .allocate_and_load(PageNumber::new(10), &mut store)
            .unwrap();

        assert_eq!(memory.read_byte(frame, Offset::new(0)), Ok(10));
        assert_eq!(memory.read_byte(frame, Offset::new(5)), Ok(15));
        assert_eq!(memory.read_byte(frame, Offset::new(255)), Ok((10 + 255) as u8));
        assert_eq!(
            memory.read_physical(PhysicalMemory::physical_address(frame, Offset::new(5))),
            Ok(15)
        );
    }

    #[test]
    fn unallocated_frame_read_fails() {
        let memory = PhysicalMemory::new();
        assert_eq!(
            memory.read_byte(FrameNumber::new(0), Offset::new(0)),
            Err(MemoryError::OutOfRange)
        );
    }

    #[test]
    fn out_of_range_reads_fail() {
        let mut memory = PhysicalMemory::new();
        let mut store = patterned_store();
        let frame = memory
            .allocate_and_load(PageNumber::new(1), &mut store)
            .unwrap();

        assert_eq!(
            memory.read_byte(frame, Offset::new(256)),
            Err(MemoryError::OutOfRange)
        );
        assert_eq!(
            memory.read_byte(FrameNumber::new(256), Offset::new(0)),
            Err(MemoryError::OutOfRange)
        );
    }

    #[test]
    fn physical_address_is_frame_times_page_size_plus_offset() {
        let addr = PhysicalMemory::physical_address(FrameNumber::new(2), Offset::new(9));
        assert_eq!(addr.as_usize(), 2 * 256 + 9);
    }

    #[test]
    fn capacity_exceeded_after_every_frame_is_used() {
        let mut memory = PhysicalMemory::new();
        let mut store = patterned_store();

        for page in 0..256 {
            memory
                .allocate_and_load(PageNumber::new(page), &mut store)
                .unwrap();
        }
        assert_eq!(memory.free_frames(), 0);

        assert_eq!(
            memory.allocate_and_load(PageNumber::new(0), &mut store),
            Err(MemoryError::CapacityExceeded)
        );
        // Nothing was overwritten.
        assert_eq!(memory.owner(FrameNumber::new(0)), Some(PageNumber::new(0)));
        assert_eq!(memory.read_byte(FrameNumber::new(255), Offset::new(0)), Ok(255));
    }

    #[test]
    fn load_failure_does_not_consume_a_frame() {
        let mut memory = PhysicalMemory::new();

        assert_eq!(
            memory.allocate_and_load(PageNumber::new(0), &mut MissingStore),
            Err(MemoryError::Load(LoadError::MissingBackingStore))
        );
        assert_eq!(memory.allocated_frames(), 0);
    }
}
