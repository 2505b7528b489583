use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use gameboy::core::games::life::GLIDER;
use gameboy::core::games::LifeRules;
use gameboy::core::{GameEngine, GameSnapshot};
use gameboy::types::{Button, Intent};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn life_ticks_and_snapshots_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let mut engine = GameEngine::new(LifeRules::new(), 1);
    engine.new_game();
    for &(x, y) in &GLIDER {
        engine.update(&Intent::click(x + 4, y + 4));
    }
    engine.update(&Intent::press(Button::A));

    let mut snap = GameSnapshot::default();
    snap.info_label.reserve(64);

    // Warm-up reaches three-digit generations so the status line is at its
    // longest before counting starts.
    for _ in 0..100 {
        engine.update(&Intent::none());
    }
    engine.snapshot_into(&mut snap);

    let allocs = with_alloc_counting(|| {
        for _ in 0..200 {
            engine.update(&Intent::none());
            engine.snapshot_into(&mut snap);
        }
        // Pause, single-step and click paths.
        engine.update(&Intent::press(Button::A));
        for i in 0..20 {
            engine.update(&Intent::click(i, 19 - i));
            engine.update(&Intent::press(Button::B));
        }
    });

    assert_eq!(allocs, 0);
}
