//! A pedagogical user-space allocator over two independent, fixed-size
//! arenas (`H = 4096` bytes each), obtained directly from the host via
//! `mmap` and never grown.
//!
//! The main arena serves four placement strategies over the same
//! address-ordered free list and size-keyed skip list: first-fit,
//! next-fit, best-fit, and worst-fit. The buddy arena is a second,
//! separate region split and merged strictly in powers of two. A single
//! [`Allocator`] owns both arenas plus a tag recording whichever strategy
//! ran most recently; [`current_strategy`] and [`strategy_name`] expose it.
//!
//! Most programs just want the process-wide default, reached through the
//! free functions at the crate root:
//!
//! ```
//! let p = strata_alloc::alloc_first_fit(64).expect("arena has room");
//! unsafe { strata_alloc::free(Some(p)) };
//! ```
//!
//! Tests and anything else that needs a fresh, isolated pair of arenas
//! should construct its own [`Allocator`] instead.

mod allocator;
mod arena;
mod buddy;
mod main_arena;
mod strategy;

pub use allocator::Allocator;
pub use strategy::{strategy_name, StrategyTag};

use std::ptr::NonNull;

static DEFAULT: Allocator = Allocator::new();

/// First-fit allocation from the process-wide default allocator.
pub fn alloc_first_fit(size: usize) -> Option<NonNull<u8>> {
    DEFAULT.alloc_first_fit(size)
}

/// Next-fit allocation from the process-wide default allocator.
pub fn alloc_next_fit(size: usize) -> Option<NonNull<u8>> {
    DEFAULT.alloc_next_fit(size)
}

/// Best-fit allocation from the process-wide default allocator.
pub fn alloc_best_fit(size: usize) -> Option<NonNull<u8>> {
    DEFAULT.alloc_best_fit(size)
}

/// Worst-fit allocation from the process-wide default allocator.
pub fn alloc_worst_fit(size: usize) -> Option<NonNull<u8>> {
    DEFAULT.alloc_worst_fit(size)
}

/// Power-of-two allocation from the process-wide default allocator.
pub fn alloc_buddy(size: usize) -> Option<NonNull<u8>> {
    DEFAULT.alloc_buddy(size)
}

/// Frees a pointer obtained from one of the `alloc_*` functions above.
/// `None` and unrecognized pointers are silently ignored.
///
/// # Safety
/// `ptr`, if present, must have been returned by one of this module's
/// `alloc_*` functions and not already freed.
pub unsafe fn free(ptr: Option<NonNull<u8>>) {
    unsafe { DEFAULT.free(ptr) };
}

/// The strategy tag most recently recorded by the default allocator.
pub fn current_strategy() -> StrategyTag {
    DEFAULT.current_strategy()
}

#[cfg(test)]
mod tests {
    use super::*;

    // The process-wide default is shared across every test in this binary,
    // so these exercise it only for properties that hold regardless of
    // what else has run against it; anything needing a pristine arena
    // builds its own `Allocator` instead (the crate's own tests do this
    // throughout `main_arena` and `buddy`).

    #[test]
    fn default_allocator_round_trips_a_first_fit_block() {
        let p = alloc_first_fit(64).expect("default arena should have room");
        unsafe { free(Some(p)) };
    }

    #[test]
    fn current_strategy_reflects_the_last_call_on_a_fresh_instance() {
        let a = Allocator::new();
        a.alloc_worst_fit(16);
        assert_eq!(a.current_strategy(), StrategyTag::WORST);
        assert_eq!(strategy_name(a.current_strategy()), "worst-fit");
    }
}
