//! Address-ordered doubly linked free list. Kept in ascending
//! address order so address-adjacent neighbors are always a single hop
//! away, which is what makes coalescing cheap.

use super::header::{FreeBlockHeader, HEADER_SIZE};
use std::ptr;

/// Links `node` between `prev` and `next`, updating `*head` if `prev` is null.
///
/// # Safety
/// `prev`, `next` and `node` must each be null or point at a currently
/// valid header, and `prev`/`next` must already be adjacent in the list
/// that `head` describes.
pub(crate) unsafe fn insert_at_position(
    head: &mut *mut FreeBlockHeader,
    prev: *mut FreeBlockHeader,
    next: *mut FreeBlockHeader,
    node: *mut FreeBlockHeader,
) {
    unsafe {
        (*node).addr_prev = prev;
        (*node).addr_next = next;
        if !prev.is_null() {
            (*prev).addr_next = node;
        } else {
            *head = node;
        }
        if !next.is_null() {
            (*next).addr_prev = node;
        }
    }
}

/// Removes `node` from the list, preserving the order of what remains.
///
/// # Safety
/// `node` must currently be linked into the list that `head` describes.
pub(crate) unsafe fn unlink(head: &mut *mut FreeBlockHeader, node: *mut FreeBlockHeader) {
    unsafe {
        let prev = (*node).addr_prev;
        let next = (*node).addr_next;
        if !prev.is_null() {
            (*prev).addr_next = next;
        } else {
            *head = next;
        }
        if !next.is_null() {
            (*next).addr_prev = prev;
        }
        (*node).addr_prev = ptr::null_mut();
        (*node).addr_next = ptr::null_mut();
    }
}

/// True iff `a`'s block ends exactly where `b` begins.
///
/// # Safety
/// `a` and `b` must both point at valid headers.
pub(crate) unsafe fn adjacent(a: *mut FreeBlockHeader, b: *mut FreeBlockHeader) -> bool {
    unsafe { (a as *mut u8).add(HEADER_SIZE + (*a).size) as *mut FreeBlockHeader == b }
}

/// Finds the `(prev, next)` gap that an address-ordered insert of `node`
/// belongs in, starting the scan from `head`.
///
/// # Safety
/// `head` must be null or point at the first node of a valid,
/// address-ordered list.
pub(crate) unsafe fn find_insert_position(
    head: *mut FreeBlockHeader,
    node: *mut FreeBlockHeader,
) -> (*mut FreeBlockHeader, *mut FreeBlockHeader) {
    unsafe {
        let mut prev = ptr::null_mut();
        let mut cur = head;
        while !cur.is_null() && (cur as usize) < (node as usize) {
            prev = cur;
            cur = (*cur).addr_next;
        }
        (prev, cur)
    }
}
