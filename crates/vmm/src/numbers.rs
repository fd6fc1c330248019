//! Page, frame and offset number types.
//!
//! This module provides newtypes for logical page numbers, physical frame numbers and
//! in-page offsets, which are used throughout the translation pipeline.
//!
//! The wrapped value is a `usize`, so out-of-range numbers such as page 256 are
//! representable. Lookups treat them as absent; they never wrap onto a valid slot.

use crate::layout;
use core::{fmt, ops::Add};

/// Defines a bounded `usize` newtype with the accessors every number type shares.
macro_rules! impl_number_common {
    ($name:ident, $limit:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name(usize);

        impl $name {
            /// Number of valid values for this type.
            pub const LIMIT: usize = $limit;

            /// Creates a new number.
            #[inline]
            pub const fn new(number: usize) -> Self {
                Self(number)
            }

            /// Returns the raw number.
            #[inline]
            pub const fn as_usize(self) -> usize {
                self.0
            }

            /// Returns true if this number addresses a slot that actually exists.
            #[inline]
            pub const fn is_valid(self) -> bool {
                self.0 < Self::LIMIT
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Add<usize> for $name {
            type Output = Self;

            #[inline]
            fn add(self, rhs: usize) -> Self::Output {
                Self(self.0 + rhs)
            }
        }
    };
}

impl_number_common!(
    FrameNumber,
    layout::FRAME_COUNT,
    "A physical memory frame number.\n\n\
     Identifies one PAGE_SIZE slot of physical memory. Frames are handed out in increasing\n\
     order starting at 0 and are never reused."
);

impl_number_common!(
    PageNumber,
    layout::PAGE_COUNT,
    "A logical page number.\n\n\
     The high eight bits of a logical address."
);

impl PageNumber {
    /// Returns the byte offset of this page within the backing store.
    #[inline]
    pub const fn store_offset(self) -> usize {
        self.0 * layout::PAGE_SIZE
    }
}

impl_number_common!(
    Offset,
    layout::PAGE_SIZE,
    "A byte offset within a page or frame.\n\n\
     The low eight bits of a logical address."
);

#[cfg(test)]
mod tests {
    use super::*;

    mod frame_number {
        use super::*;

        #[test]
        fn new_frame() {
            let frame = FrameNumber::new(42);
            assert_eq!(frame.as_usize(), 42);
        }

        #[test]
        fn validity() {
            assert!(FrameNumber::new(0).is_valid());
            assert!(FrameNumber::new(255).is_valid());
            assert!(!FrameNumber::new(256).is_valid());
        }

        #[test]
        fn next_frame() {
            let frame = FrameNumber::new(10);
            assert_eq!(frame + 1, FrameNumber::new(11));
        }
    }

    mod page_number {
        use super::*;

        #[test]
        fn store_offset() {
            assert_eq!(PageNumber::new(0).store_offset(), 0);
            assert_eq!(PageNumber::new(3).store_offset(), 768);
        }

        #[test]
        fn validity() {
            assert!(PageNumber::new(255).is_valid());
            assert!(!PageNumber::new(256).is_valid());
            assert!(!PageNumber::new(usize::MAX).is_valid());
        }

        #[test]
        fn comparison() {
            let page1 = PageNumber::new(5);
            let page2 = PageNumber::new(10);

            assert!(page1 < page2);
            assert_eq!(page1, PageNumber::new(5));
            assert_ne!(page1, page2);
        }
    }

    #[test]
    fn debug_and_display() {
        assert_eq!(format!("{:?}", Offset::new(7)), "Offset(7)");
        assert_eq!(format!("{}", PageNumber::new(7)), "7");
    }
}
