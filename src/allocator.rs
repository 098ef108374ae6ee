//! The testability and construction surface: an explicit
//! [`Allocator`] value that owns both arenas and the strategy tag, plus a
//! process-wide default that the free functions in [`crate`] delegate to.

use crate::buddy::BuddyArena;
use crate::main_arena::MainArena;
use crate::strategy::StrategyTag;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, OnceLock};

/// Owns one main arena, one buddy arena, and the tag of the
/// most-recently-invoked strategy. Both arenas are bootstrapped lazily, on
/// first use, not at construction.
pub struct Allocator {
    main: OnceLock<Mutex<MainArena>>,
    buddy: OnceLock<Mutex<BuddyArena>>,
    tag: AtomicU8,
}

impl Allocator {
    pub const fn new() -> Self {
        Self { main: OnceLock::new(), buddy: OnceLock::new(), tag: AtomicU8::new(0) }
    }

    fn main(&self) -> &Mutex<MainArena> {
        self.main.get_or_init(|| Mutex::new(MainArena::bootstrap()))
    }

    fn buddy(&self) -> &Mutex<BuddyArena> {
        self.buddy.get_or_init(|| Mutex::new(BuddyArena::bootstrap()))
    }

    fn set_tag(&self, tag: StrategyTag) {
        self.tag.store(tag.raw(), Ordering::Relaxed);
    }

    /// The strategy tag of the most recent `alloc_*` call, or
    /// [`StrategyTag::FIRST`] if none has run yet on this instance or the
    /// stored tag is otherwise out of range.
    pub fn current_strategy(&self) -> StrategyTag {
        StrategyTag::from_raw(self.tag.load(Ordering::Relaxed)).or_first()
    }

    /// The tag is recorded at entry, before the placement search runs, so
    /// it reflects the strategy that was *tried* even on a failed request.
    pub fn alloc_first_fit(&self, size: usize) -> Option<NonNull<u8>> {
        self.set_tag(StrategyTag::FIRST);
        self.main().lock().unwrap().alloc_first_fit(size)
    }

    pub fn alloc_next_fit(&self, size: usize) -> Option<NonNull<u8>> {
        self.set_tag(StrategyTag::NEXT);
        self.main().lock().unwrap().alloc_next_fit(size)
    }

    pub fn alloc_best_fit(&self, size: usize) -> Option<NonNull<u8>> {
        self.set_tag(StrategyTag::BEST);
        self.main().lock().unwrap().alloc_best_fit(size)
    }

    pub fn alloc_worst_fit(&self, size: usize) -> Option<NonNull<u8>> {
        self.set_tag(StrategyTag::WORST);
        self.main().lock().unwrap().alloc_worst_fit(size)
    }

    pub fn alloc_buddy(&self, size: usize) -> Option<NonNull<u8>> {
        self.set_tag(StrategyTag::BUDDY);
        self.buddy().lock().unwrap().alloc(size)
    }

    /// Frees a pointer previously returned by any `alloc_*` method on this
    /// same instance. A `None` or otherwise unrecognized pointer is a
    /// silent no-op; dispatch checks the buddy arena's range
    /// first since its headers carry the same magic constants as the main
    /// arena's.
    ///
    /// # Safety
    /// `ptr`, if present, must have been returned by an `alloc_*` method on
    /// this same `Allocator` and not already freed.
    pub unsafe fn free(&self, ptr: Option<NonNull<u8>>) {
        let Some(ptr) = ptr else { return };
        let raw = ptr.as_ptr();

        if self.buddy().lock().unwrap().contains(raw) {
            unsafe { self.buddy().lock().unwrap().free(raw) };
            return;
        }
        if self.main().lock().unwrap().contains_payload(raw) {
            unsafe { self.main().lock().unwrap().free(raw) };
        }
    }
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn independent_instances_do_not_share_arenas() {
        let a = Allocator::new();
        let b = Allocator::new();

        // Draining `a` down to nothing must not affect `b`'s capacity.
        let mut chunks = Vec::new();
        while let Some(p) = a.alloc_first_fit(64) {
            chunks.push(p);
        }
        assert!(!chunks.is_empty());
        assert!(a.alloc_first_fit(1).is_none());
        assert!(b.alloc_first_fit(64).is_some());

        for p in chunks {
            unsafe { a.free(Some(p)) };
        }
    }

    #[test]
    fn current_strategy_tracks_the_most_recent_call_even_on_failure() {
        let a = Allocator::new();
        assert_eq!(a.current_strategy(), StrategyTag::FIRST);

        a.alloc_best_fit(64);
        assert_eq!(a.current_strategy(), StrategyTag::BEST);

        // A request too large to satisfy still records that best-fit ran.
        a.alloc_best_fit(usize::MAX / 2);
        assert_eq!(a.current_strategy(), StrategyTag::BEST);

        a.alloc_buddy(16);
        assert_eq!(a.current_strategy(), StrategyTag::BUDDY);
    }

    #[test]
    fn freeing_a_buddy_pointer_and_a_main_arena_pointer_both_route_correctly() {
        let a = Allocator::new();
        let main_ptr = a.alloc_first_fit(64).unwrap();
        let buddy_ptr = a.alloc_buddy(64).unwrap();

        unsafe {
            a.free(Some(main_ptr));
            a.free(Some(buddy_ptr));
        }
    }

    #[test]
    fn freeing_none_is_a_no_op() {
        let a = Allocator::new();
        unsafe { a.free(None) };
    }
}
