//! End-to-end scenarios driven entirely through the public API, each
//! against its own fresh `Allocator` so nothing here depends on test
//! execution order.

use strata_alloc::{strategy_name, Allocator, StrategyTag};

#[test]
fn buddy_round_trip_leaves_a_single_top_order_free_block() {
    let alloc = Allocator::new();

    let c = alloc.alloc_buddy(256).expect("256 bytes should fit a buddy block");
    let message = b"Buddy blocks are power-of-two sized!";
    unsafe {
        std::ptr::copy_nonoverlapping(message.as_ptr(), c.as_ptr(), message.len());
        let read_back = std::slice::from_raw_parts(c.as_ptr(), message.len());
        assert_eq!(read_back, message);
        alloc.free(Some(c));
    }

    assert_eq!(alloc.current_strategy(), StrategyTag::BUDDY);
    assert_eq!(strategy_name(alloc.current_strategy()), "buddy");

    // A large request must now succeed again, which only holds if freeing
    // `c` fully re-merged the arena back to one top-order block.
    let large = alloc.alloc_buddy(2000);
    assert!(large.is_some());
}

#[test]
fn freeing_a_pointer_that_was_never_allocated_is_a_silent_no_op() {
    let alloc = Allocator::new();

    let live = alloc.alloc_first_fit(64).expect("arena should have room");
    let bogus = unsafe { live.as_ptr().add(2) };

    unsafe {
        alloc.free(std::ptr::NonNull::new(bogus));
    }

    // The genuinely live block must still be usable and nothing else
    // should have been disturbed: a second allocation continues to work,
    // and freeing the real pointer afterwards still restores the arena.
    let other = alloc.alloc_first_fit(64).expect("arena should still be consistent");
    unsafe {
        alloc.free(Some(live));
        alloc.free(Some(other));
    }
}

#[test]
fn free_dispatches_to_whichever_arena_actually_owns_the_pointer() {
    let alloc = Allocator::new();

    let main_ptr = alloc.alloc_first_fit(64).expect("main arena should have room");
    let buddy_ptr = alloc.alloc_buddy(64).expect("buddy arena should have room");

    unsafe {
        alloc.free(Some(buddy_ptr));
        alloc.free(Some(main_ptr));
    }

    // Both arenas should be fully reusable afterward.
    assert!(alloc.alloc_first_fit(64).is_some());
    assert!(alloc.alloc_buddy(64).is_some());
}

#[test]
fn independent_allocators_never_observe_each_others_state() {
    let a = Allocator::new();
    let b = Allocator::new();

    a.alloc_best_fit(37);
    assert_eq!(a.current_strategy(), StrategyTag::BEST);
    assert_eq!(b.current_strategy(), StrategyTag::FIRST);
}
