//! The main arena: first/next/best/worst-fit allocation over a
//! single 4 KiB region, backed by an address-ordered free list and a
//! size-keyed skip list that stay mutually consistent across every
//! allocate, split, free, and coalesce.

mod address_list;
mod coalesce;
mod header;
mod size_index;
mod split;
mod strategies;

use crate::arena::{MmapRegion, ARENA_BYTES};
use header::{FreeBlockHeader, HEADER_SIZE, MAGIC_ALLOC, MAGIC_FREE, SKIP_LEVELS};
use size_index::{SizeIndex, Xorshift32};
use std::ptr::{self, NonNull};

pub(crate) struct MainArena {
    region: MmapRegion,
    head: *mut FreeBlockHeader,
    rover: *mut FreeBlockHeader,
    index: SizeIndex,
    prng: Xorshift32,
}

// Guarded by a `Mutex` at the `Allocator` layer; see src/allocator.rs.
unsafe impl Send for MainArena {}

impl MainArena {
    /// Maps a fresh arena and seeds it with a single free block spanning
    /// the whole region.
    pub(crate) fn bootstrap() -> Self {
        let region = MmapRegion::acquire(ARENA_BYTES);
        let mut index = SizeIndex::new();
        let mut prng = Xorshift32::new();

        let block = region.start() as *mut FreeBlockHeader;
        let payload_size = ARENA_BYTES - HEADER_SIZE;
        unsafe {
            FreeBlockHeader::write_free(block, payload_size);
            index.insert(block, &mut prng);
        }

        log::debug!("main arena bootstrapped: {payload_size} usable bytes");

        Self { region, head: block, rover: block, index, prng }
    }

    /// True iff `ptr` falls inside this arena's mapped region, used by the
    /// top-level free dispatch to decide which arena a pointer belongs to.
    pub(crate) fn contains_payload(&self, ptr: *mut u8) -> bool {
        self.region.contains(ptr)
    }

    pub(crate) fn alloc_first_fit(&mut self, size: usize) -> Option<NonNull<u8>> {
        if size == 0 {
            return None;
        }
        let candidate = strategies::select_first_fit(self, size)?;
        let payload = strategies::allocate_from(self, candidate, size, true);
        log::debug!("first-fit: {size} bytes at {:p}", payload.as_ptr());
        Some(payload)
    }

    pub(crate) fn alloc_next_fit(&mut self, size: usize) -> Option<NonNull<u8>> {
        if size == 0 {
            return None;
        }
        let candidate = strategies::select_next_fit(self, size)?;
        let payload = strategies::allocate_from(self, candidate, size, true);
        log::debug!("next-fit: {size} bytes at {:p}", payload.as_ptr());
        Some(payload)
    }

    pub(crate) fn alloc_best_fit(&mut self, size: usize) -> Option<NonNull<u8>> {
        if size == 0 {
            return None;
        }
        let candidate = strategies::select_best_fit(self, size)?;
        let payload = strategies::allocate_from(self, candidate, size, false);
        log::debug!("best-fit: {size} bytes at {:p}", payload.as_ptr());
        Some(payload)
    }

    pub(crate) fn alloc_worst_fit(&mut self, size: usize) -> Option<NonNull<u8>> {
        if size == 0 {
            return None;
        }
        let candidate = strategies::select_worst_fit(self, size)?;
        let payload = strategies::allocate_from(self, candidate, size, false);
        log::debug!("worst-fit: {size} bytes at {:p}", payload.as_ptr());
        Some(payload)
    }

    /// Returns `ptr` to the free list. `ptr` must already have been
    /// checked against the buddy arena's range by the caller.
    ///
    /// # Safety
    /// `ptr` must be a pointer previously returned by one of this arena's
    /// `alloc_*` methods, or any other pointer the caller is willing to
    /// have read speculatively to check its header.
    pub(crate) unsafe fn free(&mut self, ptr: *mut u8) {
        if ptr.is_null() {
            return;
        }
        let header = FreeBlockHeader::from_payload(ptr);
        unsafe {
            if (*header).magic != MAGIC_ALLOC {
                // Bogus pointer or double free: ignored silently.
                return;
            }

            let (prev, next) = address_list::find_insert_position(self.head, header);
            address_list::insert_at_position(&mut self.head, prev, next, header);
            (*header).is_free = true;
            (*header).magic = MAGIC_FREE;
            (*header).skip_forward = [ptr::null_mut(); SKIP_LEVELS];
            (*header).level = 1;
            self.index.insert(header, &mut self.prng);

            coalesce::coalesce(self, header);
        }
        log::debug!("main arena: freed {:p}", ptr);
    }
}
