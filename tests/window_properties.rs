//! Property-based tests for window resolution.
//!
//! 1. Windows are always within bounds
//! 2. Scrolling down never moves the window start up
//! 3. Window size stays within a band set by the viewport
//! 4. The top of the list starts at row 0 and the bottom ends at the last row

use proptest::prelude::*;
use rowcache::cache::{CacheId, PositionCache, RemeasurePolicy};
use rowcache::window::{overscan_rows, resolve_window, Window, WindowRequest};

// ===== Arbitrary Strategies =====

/// Whole-number row heights, at least one unit tall.
fn arb_heights() -> impl Strategy<Value = Vec<u16>> {
    prop::collection::vec(1u16..=100, 1..80)
}

fn arb_ratio() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), Just(0.5), Just(1.0), Just(2.0)]
}

/// Cache whose rows were all measured top to bottom at their true heights.
fn measured_cache(heights: &[u16]) -> PositionCache {
    let mut cache =
        PositionCache::new(heights.len(), 50.0, CacheId::new("win"), RemeasurePolicy::Once)
            .expect("non-empty heights");
    let mut start = 0.0;
    for (index, &height) in heights.iter().enumerate() {
        cache.update_cache(index, start, f64::from(height));
        start += f64::from(height);
    }
    cache
}

fn resolve(cache: &PositionCache, scroll: f64, viewport: f64, ratio: f64) -> Window {
    resolve_window(
        cache,
        &WindowRequest::new(scroll, Some(viewport), cache.len()).with_overscan_ratio(ratio),
    )
    .expect("viewport and data are known")
}

// ===== Property 1: Bounds =====

proptest! {
    #[test]
    fn window_is_within_bounds(
        length in 1usize..100,
        estimate in 1u16..200,
        measurements in prop::collection::vec((0usize..100, 0u16..5000, 1u16..300), 0..30),
        data_length in 1usize..120,
        scroll in -1000.0f64..20000.0,
        viewport in 0.0f64..3000.0,
        ratio in arb_ratio(),
    ) {
        let mut cache = PositionCache::new(
            length,
            f64::from(estimate),
            CacheId::new("bounds"),
            RemeasurePolicy::Always,
        )
        .expect("valid cache");
        for (index, start, height) in measurements {
            cache.update_cache(index, f64::from(start), f64::from(height));
        }

        let request =
            WindowRequest::new(scroll, Some(viewport), data_length).with_overscan_ratio(ratio);
        let window = resolve_window(&cache, &request).expect("viewport and data are known");

        prop_assert!(window.start_index <= window.end_index);
        prop_assert!(window.end_index <= data_length - 1);
    }
}

// ===== Property 2: Monotonicity =====

proptest! {
    #[test]
    fn scrolling_down_never_moves_start_up(
        heights in arb_heights(),
        viewport in 1.0f64..500.0,
        first in 0.0f64..1.0,
        second in 0.0f64..1.0,
        ratio in arb_ratio(),
    ) {
        let cache = measured_cache(&heights);
        let total = cache.total_height();
        let (low, high) = if first <= second { (first, second) } else { (second, first) };

        let upper = resolve(&cache, low * total, viewport, ratio);
        let lower = resolve(&cache, high * total, viewport, ratio);

        prop_assert!(upper.start_index <= lower.start_index);
        prop_assert!(upper.end_index <= lower.end_index);
    }
}

// ===== Property 3: Bounded Band =====

proptest! {
    #[test]
    fn window_size_is_bounded_by_viewport(
        heights in arb_heights(),
        viewport in 1.0f64..500.0,
        position in 0.0f64..1.0,
        ratio in arb_ratio(),
    ) {
        let cache = measured_cache(&heights);
        let min_height = f64::from(*heights.iter().min().expect("non-empty"));
        let overscan = overscan_rows(viewport, cache.estimated_row_height(), ratio);

        let window = resolve(&cache, position * cache.total_height(), viewport, ratio);

        let band = (viewport / min_height).ceil() as usize + 3 + 2 * overscan;
        prop_assert!(
            window.end_index - window.start_index <= band,
            "window {} exceeds band {}",
            window,
            band
        );
    }
}

// ===== Property 4: Boundaries =====

proptest! {
    #[test]
    fn top_starts_at_first_row(
        heights in arb_heights(),
        viewport in 0.0f64..500.0,
        ratio in arb_ratio(),
    ) {
        let cache = measured_cache(&heights);
        prop_assert_eq!(resolve(&cache, 0.0, viewport, ratio).start_index, 0);
    }

    #[test]
    fn bottom_ends_at_last_row(
        heights in arb_heights(),
        viewport in 0.0f64..500.0,
        past_end in 0.0f64..200.0,
        ratio in arb_ratio(),
    ) {
        let cache = measured_cache(&heights);
        let scroll = (cache.total_height() - viewport).max(0.0) + past_end;

        let window = resolve(&cache, scroll, viewport, ratio);

        prop_assert_eq!(window.end_index, heights.len() - 1);
    }
}

// ===== Concrete Scenario =====

#[test]
fn half_viewport_overscan_covers_short_list() {
    let mut cache =
        PositionCache::new(5, 100.0, CacheId::new("scenario"), RemeasurePolicy::Once).unwrap();
    cache.update_cache(2, 180.0, 150.0);

    let window = resolve(&cache, 150.0, 200.0, 0.5);

    assert_eq!(overscan_rows(200.0, cache.estimated_row_height(), 0.5), 2);
    assert_eq!(window, Window::new(0, 4));
}
