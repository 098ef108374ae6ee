//! The buddy header: sits immediately before the payload of every
//! block in the buddy arena.

use std::mem::size_of;
use std::ptr;

/// `Omax`: one more than the highest order a block can have. The
/// bootstrap block has order `MAX_ORDER - 1` and spans the whole arena,
/// so the buddy arena's usable span is the same 4096 bytes as the main
/// arena's.
pub(crate) const MAX_ORDER: usize = 13;

pub(crate) const MAGIC_FREE: u32 = 0xFEED_FACE;
pub(crate) const MAGIC_ALLOC: u32 = 0xDEAD_BEEF;

#[repr(C)]
pub(crate) struct BuddyHeader {
    pub size: usize,
    pub prev: *mut BuddyHeader,
    pub next: *mut BuddyHeader,
    pub order: u8,
    pub magic: u32,
    pub is_free: bool,
}

pub(crate) const HEADER_SIZE: usize = size_of::<BuddyHeader>();

impl BuddyHeader {
    /// Writes a header of the given order at `at`.
    ///
    /// # Safety
    /// `at` must be valid for writes of `HEADER_SIZE` bytes and suitably
    /// aligned for `BuddyHeader`.
    pub(crate) unsafe fn write(at: *mut BuddyHeader, order: u8, is_free: bool) {
        unsafe {
            ptr::write(
                at,
                BuddyHeader {
                    size: 1usize << order,
                    prev: ptr::null_mut(),
                    next: ptr::null_mut(),
                    order,
                    magic: if is_free { MAGIC_FREE } else { MAGIC_ALLOC },
                    is_free,
                },
            );
        }
    }

    #[inline]
    pub(crate) fn payload(header: *mut BuddyHeader) -> *mut u8 {
        unsafe { (header as *mut u8).add(HEADER_SIZE) }
    }

    #[inline]
    pub(crate) fn from_payload(payload: *mut u8) -> *mut BuddyHeader {
        unsafe { payload.sub(HEADER_SIZE) as *mut BuddyHeader }
    }
}
