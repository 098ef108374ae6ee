//! Placement strategies. All four share one "allocate from
//! candidate" primitive; they differ only in how the candidate is found,
//! and in whether that selection owns the next-fit rover.

use super::header::{FreeBlockHeader, MAGIC_ALLOC};
use super::{address_list, split, MainArena};
use std::ptr::{self, NonNull};

/// A free block selected by some strategy, together with its current
/// address-list neighbors (captured before it is unlinked).
pub(super) struct Candidate {
    block: *mut FreeBlockHeader,
    prev: *mut FreeBlockHeader,
    next: *mut FreeBlockHeader,
}

/// Walks the address list from `head`; the first block with size >= `need`.
pub(super) fn select_first_fit(arena: &MainArena, need: usize) -> Option<Candidate> {
    let mut cur = arena.head;
    unsafe {
        while !cur.is_null() {
            if (*cur).size >= need {
                return Some(Candidate { block: cur, prev: (*cur).addr_prev, next: (*cur).addr_next });
            }
            cur = (*cur).addr_next;
        }
    }
    None
}

/// Starting from the rover (or head if the rover is null), walks the
/// address list circularly back to the starting block.
pub(super) fn select_next_fit(arena: &MainArena, need: usize) -> Option<Candidate> {
    if arena.head.is_null() {
        return None;
    }
    let start = if arena.rover.is_null() { arena.head } else { arena.rover };
    let mut cur = start;
    unsafe {
        loop {
            if (*cur).size >= need {
                return Some(Candidate { block: cur, prev: (*cur).addr_prev, next: (*cur).addr_next });
            }
            cur = if !(*cur).addr_next.is_null() { (*cur).addr_next } else { arena.head };
            if cur == start || cur.is_null() {
                break;
            }
        }
    }
    None
}

/// The smallest adequate block, via the size index.
pub(super) fn select_best_fit(arena: &MainArena, need: usize) -> Option<Candidate> {
    let block = unsafe { arena.index.first_ge(need) };
    if block.is_null() {
        return None;
    }
    Some(unsafe { Candidate { block, prev: (*block).addr_prev, next: (*block).addr_next } })
}

/// The largest block in the size index, if it is adequate.
pub(super) fn select_worst_fit(arena: &MainArena, need: usize) -> Option<Candidate> {
    let block = unsafe { arena.index.max() };
    if block.is_null() || unsafe { (*block).size } < need {
        return None;
    }
    Some(unsafe { Candidate { block, prev: (*block).addr_prev, next: (*block).addr_next } })
}

/// Unlinks the candidate from both structures, splits it, relinks any
/// remainder, stamps the outgoing header, and hands back its payload.
///
/// `owns_rover` is true for first-fit and next-fit: the reference
/// implementation leaves the rover untouched across best-fit and
/// worst-fit calls, so this flag is what keeps that asymmetry
/// without duplicating the unlink/split/relink/stamp sequence four times.
pub(super) fn allocate_from(
    arena: &mut MainArena,
    candidate: Candidate,
    need: usize,
    owns_rover: bool,
) -> NonNull<u8> {
    let Candidate { block, prev, next } = candidate;
    unsafe {
        address_list::unlink(&mut arena.head, block);
        arena.index.remove(block);

        let rem = split::split(block, need);
        if !rem.is_null() {
            address_list::insert_at_position(&mut arena.head, prev, next, rem);
            arena.index.insert(rem, &mut arena.prng);
            if owns_rover {
                arena.rover = rem;
            }
        } else if owns_rover {
            arena.rover = if !next.is_null() { next } else { arena.head };
        }

        if owns_rover && arena.head.is_null() {
            arena.rover = ptr::null_mut();
        }

        (*block).is_free = false;
        (*block).magic = MAGIC_ALLOC;

        NonNull::new_unchecked(FreeBlockHeader::payload(block))
    }
}
