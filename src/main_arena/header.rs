//! The free-block header: sits immediately before the payload of
//! every block in the main arena, whether free or allocated.

use std::mem::size_of;
use std::ptr;

/// Maximum skip-list level (`L`).
pub(crate) const SKIP_LEVELS: usize = 6;
/// Minimum payload bytes a split remainder must retain (`T`).
pub(crate) const MIN_TAIL: usize = 32;

pub(crate) const MAGIC_FREE: u32 = 0xFEED_FACE;
pub(crate) const MAGIC_ALLOC: u32 = 0xDEAD_BEEF;

#[repr(C)]
pub(crate) struct FreeBlockHeader {
    /// Payload bytes controlled by this header, excluding the header itself.
    pub size: usize,
    pub addr_prev: *mut FreeBlockHeader,
    pub addr_next: *mut FreeBlockHeader,
    pub skip_forward: [*mut FreeBlockHeader; SKIP_LEVELS],
    /// Height assigned at index insertion, in `[1, SKIP_LEVELS]`.
    pub level: usize,
    pub magic: u32,
    pub is_free: bool,
}

pub(crate) const HEADER_SIZE: usize = size_of::<FreeBlockHeader>();

impl FreeBlockHeader {
    /// Writes a fresh free-block header at `at`, with no address-list or
    /// skip-list links yet.
    ///
    /// # Safety
    /// `at` must be valid for writes of `HEADER_SIZE` bytes and suitably
    /// aligned for `FreeBlockHeader`.
    pub(crate) unsafe fn write_free(at: *mut FreeBlockHeader, size: usize) {
        unsafe {
            ptr::write(
                at,
                FreeBlockHeader {
                    size,
                    addr_prev: ptr::null_mut(),
                    addr_next: ptr::null_mut(),
                    skip_forward: [ptr::null_mut(); SKIP_LEVELS],
                    level: 1,
                    magic: MAGIC_FREE,
                    is_free: true,
                },
            );
        }
    }

    #[inline]
    pub(crate) fn payload(header: *mut FreeBlockHeader) -> *mut u8 {
        unsafe { (header as *mut u8).add(HEADER_SIZE) }
    }

    #[inline]
    pub(crate) fn from_payload(payload: *mut u8) -> *mut FreeBlockHeader {
        unsafe { payload.sub(HEADER_SIZE) as *mut FreeBlockHeader }
    }
}
