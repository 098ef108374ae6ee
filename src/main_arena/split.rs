//! The split policy: carve a remainder only when it would be large
//! enough to stand alone as a free block, so a request never leaves behind
//! an unmergeable sliver.

use super::header::{FreeBlockHeader, HEADER_SIZE, MIN_TAIL};
use std::ptr;

/// Given a free block `blk` about to serve a request of `need` payload
/// bytes, either carves a remainder block (returned) and shrinks `blk` to
/// `need`, or leaves `blk` untouched and returns null.
///
/// # Safety
/// `blk` must point at a valid, unlinked free header with `blk.size >= need`.
pub(crate) unsafe fn split(blk: *mut FreeBlockHeader, need: usize) -> *mut FreeBlockHeader {
    unsafe {
        let total = HEADER_SIZE + (*blk).size;
        let needed = HEADER_SIZE + need;
        if total >= needed + HEADER_SIZE + MIN_TAIL {
            let rem = (blk as *mut u8).add(needed) as *mut FreeBlockHeader;
            FreeBlockHeader::write_free(rem, total - needed - HEADER_SIZE);
            (*blk).size = need;
            rem
        } else {
            ptr::null_mut()
        }
    }
}
