//! The size index: a skip list over the same free blocks as the
//! address list, keyed by `(size, address)` so best-fit and worst-fit run
//! in expected `O(log N)`.

use super::header::{FreeBlockHeader, SKIP_LEVELS};
use std::ptr;

const PRNG_SEED: u32 = 0x9E37_79B9;

/// Deterministic xorshift32 PRNG seeded with a fixed constant.
///
/// The fixed seed is a requirement, not an accident: it makes the level
/// assigned to each newly indexed block reproducible across runs, so two
/// identical operation sequences land on byte-identical addresses.
pub(crate) struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    pub(crate) fn new() -> Self {
        Self { state: PRNG_SEED }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = if x != 0 { x } else { 0xA5A5_A5A5 };
        self.state
    }

    /// Samples a level geometrically distributed with p=1/2, capped at
    /// `SKIP_LEVELS`.
    pub(crate) fn sample_level(&mut self) -> usize {
        let mut h = 1;
        while h < SKIP_LEVELS && (self.next_u32() & 1) != 0 {
            h += 1;
        }
        h
    }
}

/// `(size, address)` comparator used at every skip-list level (invariant 4).
///
/// # Safety
/// `a` and `b` must point at valid headers.
unsafe fn less(a: *mut FreeBlockHeader, b: *mut FreeBlockHeader) -> bool {
    unsafe {
        let (sa, sb) = ((*a).size, (*b).size);
        if sa != sb {
            sa < sb
        } else {
            (a as usize) < (b as usize)
        }
    }
}

/// Per-level skip-list heads over the free blocks of one main arena.
pub(crate) struct SizeIndex {
    heads: [*mut FreeBlockHeader; SKIP_LEVELS],
}

impl SizeIndex {
    pub(crate) fn new() -> Self {
        Self { heads: [ptr::null_mut(); SKIP_LEVELS] }
    }

    /// Samples a level for `node`, then splices it into levels `0..level`.
    ///
    /// # Safety
    /// `node` must point at a valid header not already indexed.
    pub(crate) unsafe fn insert(&mut self, node: *mut FreeBlockHeader, prng: &mut Xorshift32) {
        unsafe {
            let level = prng.sample_level();
            (*node).level = level;

            let mut update = [ptr::null_mut::<FreeBlockHeader>(); SKIP_LEVELS];
            let mut cur: *mut FreeBlockHeader = ptr::null_mut();
            for i in (0..SKIP_LEVELS).rev() {
                let mut p = if cur.is_null() { self.heads[i] } else { (*cur).skip_forward[i] };
                while !p.is_null() && less(p, node) {
                    cur = p;
                    p = (*p).skip_forward[i];
                }
                update[i] = cur;
            }

            for i in 0..level {
                let successor = if !update[i].is_null() {
                    (*update[i]).skip_forward[i]
                } else {
                    self.heads[i]
                };
                (*node).skip_forward[i] = successor;
                if !update[i].is_null() {
                    (*update[i]).skip_forward[i] = node;
                } else {
                    self.heads[i] = node;
                }
            }
            for i in level..SKIP_LEVELS {
                (*node).skip_forward[i] = ptr::null_mut();
            }
        }
    }

    /// Removes `node`, which must currently be indexed.
    ///
    /// # Safety
    /// `node` must point at a valid, currently indexed header.
    pub(crate) unsafe fn remove(&mut self, node: *mut FreeBlockHeader) {
        unsafe {
            let mut cur: *mut FreeBlockHeader = ptr::null_mut();
            for i in (0..SKIP_LEVELS).rev() {
                let mut p = if cur.is_null() { self.heads[i] } else { (*cur).skip_forward[i] };
                while !p.is_null() && less(p, node) {
                    cur = p;
                    p = (*p).skip_forward[i];
                }
                let successor = if !cur.is_null() { (*cur).skip_forward[i] } else { self.heads[i] };
                if successor == node {
                    if !cur.is_null() {
                        (*cur).skip_forward[i] = (*node).skip_forward[i];
                    } else {
                        self.heads[i] = (*node).skip_forward[i];
                    }
                }
            }
            (*node).skip_forward = [ptr::null_mut(); SKIP_LEVELS];
        }
    }

    /// Smallest-size node with `size >= need`; null if none (best-fit).
    ///
    /// # Safety
    /// Every indexed node must point at a valid header.
    pub(crate) unsafe fn first_ge(&self, need: usize) -> *mut FreeBlockHeader {
        unsafe {
            let mut cur: *mut FreeBlockHeader = ptr::null_mut();
            for i in (0..SKIP_LEVELS).rev() {
                let mut p = if cur.is_null() { self.heads[i] } else { (*cur).skip_forward[i] };
                while !p.is_null() && (*p).size < need {
                    cur = p;
                    p = (*p).skip_forward[i];
                }
            }
            if !cur.is_null() { (*cur).skip_forward[0] } else { self.heads[0] }
        }
    }

    /// Largest node in the index; null if empty (worst-fit).
    ///
    /// # Safety
    /// Every indexed node must point at a valid header.
    pub(crate) unsafe fn max(&self) -> *mut FreeBlockHeader {
        unsafe {
            let mut cur: *mut FreeBlockHeader = ptr::null_mut();
            for i in (0..SKIP_LEVELS).rev() {
                let mut p = if cur.is_null() { self.heads[i] } else { (*cur).skip_forward[i] };
                while !p.is_null() {
                    cur = p;
                    p = (*p).skip_forward[i];
                }
            }
            cur
        }
    }
}
