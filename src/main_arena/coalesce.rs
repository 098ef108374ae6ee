//! Coalesce: after a block is returned to the address list, merge
//! it with whichever address neighbors are adjacent, so no two
//! address-adjacent free blocks ever coexist (invariant 2).

use super::header::{FreeBlockHeader, HEADER_SIZE};
use super::{address_list, MainArena};
use std::ptr;

/// Merges `b` with its left/right address neighbors if adjacent, and
/// reinserts the surviving block into the size index. Returns the
/// (possibly merged) surviving block.
///
/// # Safety
/// `b` must already be linked into `arena`'s address list and indexed in
/// its size index.
pub(crate) unsafe fn coalesce(arena: &mut MainArena, mut b: *mut FreeBlockHeader) -> *mut FreeBlockHeader {
    unsafe {
        let left = (*b).addr_prev;
        let right = (*b).addr_next;
        let merge_left = !left.is_null() && address_list::adjacent(left, b);
        let merge_right = !right.is_null() && address_list::adjacent(b, right);

        if merge_left || merge_right {
            if merge_left {
                arena.index.remove(left);
            }
            arena.index.remove(b);
            if merge_right {
                arena.index.remove(right);
            }

            if merge_left {
                (*left).addr_next = (*b).addr_next;
                if !(*b).addr_next.is_null() {
                    (*(*b).addr_next).addr_prev = left;
                }
                (*left).size += HEADER_SIZE + (*b).size;
                if arena.rover == b || arena.rover == left {
                    arena.rover = left;
                }
                b = left;
            }

            if merge_right {
                let right_next = (*right).addr_next;
                (*b).addr_next = right_next;
                if !right_next.is_null() {
                    (*right_next).addr_prev = b;
                }
                (*b).size += HEADER_SIZE + (*right).size;
                if arena.rover == right || arena.rover == b {
                    arena.rover = b;
                }
            }

            arena.index.insert(b, &mut arena.prng);
            log::debug!(
                "main arena: coalesced into {:p} ({} bytes, merged left={merge_left} right={merge_right})",
                b,
                (*b).size
            );
        }

        if arena.head.is_null() {
            arena.rover = ptr::null_mut();
        }

        b
    }
}
