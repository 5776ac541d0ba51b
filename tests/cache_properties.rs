//! Property-based invariant tests for PositionCache.
//!
//! 1. Total height equals the end of the last row after every mutation
//! 2. Rebuilt caches are contiguous
//! 3. Measurement updates keep unmeasured neighbours contiguous
//! 4. Measured rows downstream of an update are never shifted
//! 5. Repeating a measurement is quiet
//! 6. Append preserves the prior layout
//!
//! Positions and heights are whole numbers so every sum is exact in f64.

use proptest::prelude::*;
use rowcache::cache::{CacheId, PositionCache, RemeasurePolicy, UpdateOutcome};
use std::sync::{Arc, Mutex};

// ===== Arbitrary Strategies =====

#[derive(Debug, Clone)]
enum Op {
    Update { index: usize, start: i32, height: u16 },
    Resize { length: usize },
    RemeasureAll,
    Reset { length: Option<usize> },
}

fn arb_policy() -> impl Strategy<Value = RemeasurePolicy> {
    prop_oneof![Just(RemeasurePolicy::Once), Just(RemeasurePolicy::Always)]
}

/// Update indices may run past the end to exercise stale reports.
fn arb_update() -> impl Strategy<Value = Op> {
    (0usize..60, -500i32..5000, 1u16..300).prop_map(|(index, start, height)| Op::Update {
        index,
        start,
        height,
    })
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => arb_update(),
        1 => (1usize..60).prop_map(|length| Op::Resize { length }),
        1 => Just(Op::RemeasureAll),
        1 => proptest::option::of(1usize..60).prop_map(|length| Op::Reset { length }),
    ]
}

fn new_cache(length: usize, estimate: u16, policy: RemeasurePolicy) -> PositionCache {
    PositionCache::new(length, f64::from(estimate), CacheId::new("prop"), policy)
        .expect("valid cache")
}

fn apply(cache: &mut PositionCache, op: &Op) {
    match *op {
        Op::Update {
            index,
            start,
            height,
        } => {
            cache.update_cache(index, f64::from(start), f64::from(height));
        }
        Op::Resize { length } => cache.resize(length, None).expect("non-zero length"),
        Op::RemeasureAll => cache.remeasure_all(),
        Op::Reset { length } => cache.reset(length, None).expect("non-zero length"),
    }
}

fn assert_contiguous(cache: &PositionCache) -> Result<(), TestCaseError> {
    for pair in cache.entries().windows(2) {
        prop_assert_eq!(pair[1].start_pos, pair[0].end_pos());
    }
    Ok(())
}

// ===== Property 1: Total Height Consistency =====

proptest! {
    #[test]
    fn total_height_is_end_of_last_row(
        length in 1usize..60,
        estimate in 1u16..200,
        policy in arb_policy(),
        ops in prop::collection::vec(arb_op(), 0..40),
    ) {
        let mut cache = new_cache(length, estimate, policy);
        for op in &ops {
            apply(&mut cache, op);
            let last = cache.entries().last().expect("cache is never empty");
            prop_assert_eq!(cache.total_height(), last.end_pos());
            prop_assert!(!cache.is_empty());
        }
    }
}

// ===== Property 2: Rebuilt Caches Are Contiguous =====

proptest! {
    #[test]
    fn rebuild_restores_contiguity(
        length in 1usize..60,
        estimate in 1u16..200,
        ops in prop::collection::vec(arb_update(), 0..20),
        new_length in 1usize..60,
    ) {
        let mut cache = new_cache(length, estimate, RemeasurePolicy::Once);
        assert_contiguous(&cache)?;

        for op in &ops {
            apply(&mut cache, op);
        }
        cache.reset(Some(new_length), None).expect("non-zero length");

        assert_contiguous(&cache)?;
        prop_assert_eq!(cache.measured_count(), 0);
        prop_assert_eq!(cache.len(), new_length);
    }
}

// ===== Property 3: Unmeasured Neighbours Stay Contiguous =====

proptest! {
    #[test]
    fn unmeasured_pairs_stay_contiguous_under_updates(
        length in 1usize..60,
        estimate in 1u16..200,
        policy in arb_policy(),
        ops in prop::collection::vec(arb_update(), 0..40),
    ) {
        let mut cache = new_cache(length, estimate, policy);
        for op in &ops {
            apply(&mut cache, op);
        }

        for pair in cache.entries().windows(2) {
            if !pair[0].measured && !pair[1].measured {
                prop_assert_eq!(pair[1].start_pos, pair[0].end_pos());
            }
        }
    }
}

// ===== Property 4: Downstream Measured Rows Are Never Shifted =====

proptest! {
    #[test]
    fn measured_rows_downstream_keep_their_position(
        length in 3usize..60,
        estimate in 1u16..200,
        later_offset in 0usize..57,
        start_shift in -300i32..300,
        height in 1u16..300,
    ) {
        let mut cache = new_cache(length, estimate, RemeasurePolicy::Once);
        let later = 1 + later_offset % (length - 1);
        let pinned = *cache.entry(later).expect("in range");
        cache.update_cache(later, pinned.start_pos, pinned.height + 1.0);

        let earlier_start = cache.entry(0).expect("in range").start_pos;
        cache.update_cache(0, earlier_start + f64::from(start_shift), f64::from(height));

        let after = cache.entry(later).expect("in range");
        prop_assert_eq!(after.start_pos, pinned.start_pos);
        prop_assert!(after.measured);
    }
}

// ===== Property 5: Repeated Measurement Is Quiet =====

proptest! {
    #[test]
    fn repeated_measurement_is_quiet(
        length in 1usize..60,
        estimate in 1u16..200,
        policy in arb_policy(),
        index_seed in 0usize..60,
        start in 0i32..5000,
        height in 1u16..300,
    ) {
        let mut cache = new_cache(length, estimate, policy);
        let calls = Arc::new(Mutex::new(0usize));
        let counter = Arc::clone(&calls);
        cache.set_callback(Some(Box::new(move |_| *counter.lock().unwrap() += 1)));

        let index = index_seed % length;
        cache.update_cache(index, f64::from(start), f64::from(height));
        let before = cache.entries().to_vec();
        let calls_before = *calls.lock().unwrap();

        let outcome = cache.update_cache(index, f64::from(start), f64::from(height));

        let expected = match policy {
            RemeasurePolicy::Once => UpdateOutcome::Ignored,
            RemeasurePolicy::Always => UpdateOutcome::Unchanged,
        };
        prop_assert_eq!(outcome, expected);
        prop_assert_eq!(cache.entries(), before.as_slice());
        prop_assert_eq!(*calls.lock().unwrap(), calls_before);
    }
}

// ===== Property 6: Append Preserves Prior Layout =====

proptest! {
    #[test]
    fn append_preserves_prior_layout(
        length in 1usize..60,
        estimate in 1u16..200,
        ops in prop::collection::vec(arb_update(), 0..20),
        extra in 1usize..40,
        new_estimate in 1u16..200,
    ) {
        let mut cache = new_cache(length, estimate, RemeasurePolicy::Always);
        for op in &ops {
            apply(&mut cache, op);
        }
        let before = cache.entries().to_vec();
        let old_total = cache.total_height();

        cache
            .resize(length + extra, Some(f64::from(new_estimate)))
            .expect("non-zero length");

        prop_assert_eq!(&cache.entries()[..length], before.as_slice());
        let tail = &cache.entries()[length..];
        prop_assert_eq!(tail.len(), extra);
        prop_assert_eq!(tail[0].start_pos, old_total);
        for pair in tail.windows(2) {
            prop_assert_eq!(pair[1].start_pos, pair[0].end_pos());
        }
        let spacing = f64::from(new_estimate);
        prop_assert_eq!(cache.estimated_row_height(), spacing);
        prop_assert!(tail.iter().all(|row| !row.measured && row.height == spacing));
    }
}

// ===== Concrete Scenario =====

#[test]
fn measurement_shifts_unmeasured_rows_and_notifies() {
    let mut cache = new_cache(5, 100, RemeasurePolicy::Once);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    cache.set_callback(Some(Box::new(move |total| sink.lock().unwrap().push(total))));

    cache.update_cache(2, 180.0, 150.0);

    let starts: Vec<f64> = cache.entries().iter().map(|row| row.start_pos).collect();
    assert_eq!(starts, vec![0.0, 100.0, 180.0, 280.0, 380.0]);
    assert_eq!(cache.total_height(), 480.0);
    assert_eq!(cache.estimated_row_height(), 96.0);
    assert_eq!(*seen.lock().unwrap(), vec![480.0]);
}
