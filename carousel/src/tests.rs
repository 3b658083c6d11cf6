use crate::*;

use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::collections::HashSet;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_i64(&mut self, start: i64, end_exclusive: i64) -> i64 {
        debug_assert!(start < end_exclusive);
        let span = (end_exclusive - start) as u64;
        start + (self.next_u64() % span) as i64
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_i64(start as i64, end_exclusive as i64) as usize
    }

    fn gen_range_f64(&mut self, start: f64, end: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        start + (end - start) * unit
    }
}

fn abc(direction: DirectionMode) -> Carousel<&'static str, &'static str> {
    abc_spaced(direction, 10.0)
}

fn abc_spaced(direction: DirectionMode, spacing: f64) -> Carousel<&'static str, &'static str> {
    Carousel::new(
        CarouselOptions::new(["A", "B", "C"])
            .with_spacing(spacing)
            .with_max_offset_abs_delta(50.0)
            .with_safety_padding(0.0)
            .with_direction(direction),
        ScrollOffset::default(),
    )
}

/// Simulates one renderer pass: measures every materialized item and reports the row.
fn layout_pass<E, K: CarouselKey>(
    c: &mut Carousel<E, K>,
    viewport_width: f64,
    width_of: impl Fn(&E, i64) -> f64,
) -> LayoutOutcome<K> {
    let spacing = c.options().spacing;
    let measurements: Vec<(ItemIdentity<K>, Size)> = c
        .materialize()
        .into_iter()
        .map(|item| {
            let width = width_of(item.element, item.identity.batch);
            (item.identity, Size::new(width, 100.0))
        })
        .collect();
    let total = measurements.iter().map(|(_, s)| s.width).sum::<f64>()
        + spacing * (measurements.len() - 1) as f64;
    c.on_layout_pass(total, viewport_width, measurements)
}

/// Runs passes until one leaves the window untouched. Returns every window-changing outcome.
fn settle<E, K: CarouselKey>(
    c: &mut Carousel<E, K>,
    viewport_width: f64,
    width_of: impl Fn(&E, i64) -> f64,
) -> Vec<LayoutOutcome<K>> {
    let mut changes = Vec::new();
    for _ in 0..1000 {
        let outcome = layout_pass(c, viewport_width, &width_of);
        if !outcome.changed_window() {
            return changes;
        }
        changes.push(outcome);
    }
    panic!("layout did not settle");
}

/// Screen x of every materialized item, keyed by identity, as a renderer would place them.
fn positions<E, K: CarouselKey>(
    c: &Carousel<E, K>,
    viewport_width: f64,
    width_of: impl Fn(&ItemIdentity<K>) -> f64,
) -> Vec<(ItemIdentity<K>, f64)> {
    let spacing = c.options().spacing;
    let items: Vec<(ItemIdentity<K>, f64)> = c
        .identities()
        .into_iter()
        .map(|id| {
            let w = width_of(&id);
            (id, w)
        })
        .collect();
    let total = items.iter().map(|(_, w)| w).sum::<f64>() + spacing * (items.len() - 1) as f64;
    let mut x = match c.direction() {
        ScrollDirection::Leading => c.scroll_offset(),
        ScrollDirection::Trailing => viewport_width + c.scroll_offset() - total,
    };
    let mut out = Vec::new();
    for (id, w) in items {
        out.push((id, x));
        x += w + spacing;
    }
    out
}

fn width_100<E>(_: &E, _: i64) -> f64 {
    100.0
}

#[test]
fn resolve_matches_floor_division() {
    let mut rng = Lcg::new(7);
    for _ in 0..2000 {
        let len = rng.gen_range_usize(1, 12);
        let i = rng.gen_range_i64(-1000, 1000);
        for traversal in [Traversal::Forward, Traversal::Reversed] {
            let r = resolve(i, len, traversal);
            assert_eq!(r.batch, i.div_euclid(len as i64));
            assert!(r.source_index < len);

            let next = resolve(i + len as i64, len, traversal);
            assert_eq!(next.batch, r.batch + 1);
            assert_eq!(next.source_index, r.source_index);
        }
    }
}

#[test]
fn resolve_handles_negative_indexes_and_reversal() {
    assert_eq!(
        resolve(-1, 3, Traversal::Forward),
        Resolved {
            source_index: 2,
            batch: -1
        }
    );
    assert_eq!(
        resolve(-1, 3, Traversal::Reversed),
        Resolved {
            source_index: 0,
            batch: -1
        }
    );
    assert_eq!(resolve(0, 3, Traversal::Reversed).source_index, 2);
    assert_eq!(resolve(4, 3, Traversal::Reversed).source_index, 1);
    assert_eq!(resolve(4, 3, Traversal::Reversed).batch, 1);
}

#[test]
#[should_panic(expected = "carousel source must not be empty")]
fn resolve_rejects_empty_source() {
    resolve(0, 0, Traversal::Forward);
}

#[test]
#[should_panic(expected = "carousel source must not be empty")]
fn materializing_empty_source_panics() {
    let c = Carousel::new(
        CarouselOptions::new(Vec::<u32>::new()),
        ScrollOffset::default(),
    );
    let _ = c.materialize();
}

#[test]
fn grows_until_viewport_and_margin_are_covered() {
    let mut c = abc(DirectionMode::default());
    assert_eq!(c.size(), 1);

    let changes = settle(&mut c, 320.0, width_100);
    assert_eq!(changes.len(), 3);
    assert!(changes.iter().all(|o| matches!(o, LayoutOutcome::Grew { .. })));
    assert_eq!(c.size(), 4);
    assert_eq!(
        c.identities(),
        vec![
            ItemIdentity::new("A", 0),
            ItemIdentity::new("B", 0),
            ItemIdentity::new("C", 0),
            ItemIdentity::new("A", 1),
        ]
    );
}

#[test]
fn trims_leading_item_once_it_is_offscreen() {
    let mut c = abc(DirectionMode::default());
    settle(&mut c, 320.0, width_100);
    c.set_scroll_offset(-151.0);

    let changes = settle(&mut c, 320.0, width_100);
    let trims: Vec<_> = changes
        .iter()
        .filter(|o| matches!(o, LayoutOutcome::Trimmed { .. }))
        .collect();
    assert_eq!(trims.len(), 1);
    assert_eq!(
        trims[0],
        &LayoutOutcome::Trimmed {
            identity: ItemIdentity::new("A", 0),
            width: 100.0
        }
    );
    assert_eq!(c.base_offset(), 1);
    assert_eq!(c.scroll_offset(), -41.0);
    assert_eq!(c.size(), 4);
    assert_eq!(
        c.identities(),
        vec![
            ItemIdentity::new("B", 0),
            ItemIdentity::new("C", 0),
            ItemIdentity::new("A", 1),
            ItemIdentity::new("B", 1),
        ]
    );
}

#[test]
fn does_not_trim_within_width_plus_max_delta() {
    let mut c = abc(DirectionMode::default());
    settle(&mut c, 320.0, width_100);

    c.set_scroll_offset(-150.0);
    let changes = settle(&mut c, 320.0, width_100);
    assert!(
        changes
            .iter()
            .all(|o| !matches!(o, LayoutOutcome::Trimmed { .. }))
    );
    assert_eq!(c.base_offset(), 0);
    assert_eq!(c.scroll_offset(), -150.0);
}

fn alternating_width(batch: i64) -> f64 {
    if batch % 2 == 0 { 100.0 } else { 70.0 }
}

#[test]
fn trim_keeps_remaining_items_in_place() {
    let cases = [
        (DirectionMode::Fixed(ScrollDirection::Leading), -1.0),
        (DirectionMode::Fixed(ScrollDirection::Trailing), 1.0),
        (
            DirectionMode::Bidirectional {
                initial: ScrollDirection::Leading,
            },
            -1.0,
        ),
        (
            DirectionMode::Bidirectional {
                initial: ScrollDirection::Leading,
            },
            1.0,
        ),
        (
            DirectionMode::Bidirectional {
                initial: ScrollDirection::Trailing,
            },
            -1.0,
        ),
    ];
    // 60 is wider than max_offset_abs_delta.
    for spacing in [10.0, 60.0] {
        for (mode, sign) in cases {
            let mut c = abc_spaced(mode, spacing);
            settle(&mut c, 320.0, |_, batch| alternating_width(batch));
            c.set_scroll_offset(sign * 151.0);
            settle(&mut c, 320.0, |_, batch| alternating_width(batch));
            c.set_scroll_offset(sign * 400.0);
            let direction = c.direction();
            loop {
                let before = positions(&c, 320.0, |id| alternating_width(id.batch));
                let outcome = layout_pass(&mut c, 320.0, |_, batch| alternating_width(batch));
                match outcome {
                    LayoutOutcome::Trimmed { identity, .. } => {
                        assert_eq!(c.direction(), direction, "{mode:?} spacing {spacing}");
                        let after = positions(&c, 320.0, |id| alternating_width(id.batch));
                        let kept: Vec<_> = before
                            .into_iter()
                            .filter(|(id, _)| *id != identity)
                            .collect();
                        assert_eq!(kept.len(), after.len());
                        for ((a, xa), (b, xb)) in kept.iter().zip(after.iter()) {
                            assert_eq!(a, b);
                            assert!(
                                (xa - xb).abs() < 1e-9,
                                "{mode:?} spacing {spacing}: {a:?} moved {xa} -> {xb}"
                            );
                        }
                        assert!(!c.identities().contains(&identity));
                        break;
                    }
                    LayoutOutcome::Grew { .. } => continue,
                    other => panic!("expected a trim for {mode:?}, got {other:?}"),
                }
            }
        }
    }
}

#[test]
fn bidirectional_trim_never_flips_the_row() {
    let mut c = abc_spaced(
        DirectionMode::Bidirectional {
            initial: ScrollDirection::Leading,
        },
        60.0,
    );
    settle(&mut c, 320.0, width_100);
    c.set_scroll_offset(-151.0);

    // Past width + max delta, but compensating by 160 would land on +9.
    let changes = settle(&mut c, 320.0, width_100);
    assert!(
        changes
            .iter()
            .all(|o| !matches!(o, LayoutOutcome::Trimmed { .. }))
    );
    assert_eq!(c.base_offset(), 0);
    assert_eq!(c.scroll_offset(), -151.0);
    assert_eq!(c.direction(), ScrollDirection::Leading);

    c.set_scroll_offset(-200.0);
    let before = positions(&c, 320.0, |_| 100.0);
    assert_eq!(
        layout_pass(&mut c, 320.0, width_100),
        LayoutOutcome::Trimmed {
            identity: ItemIdentity::new("A", 0),
            width: 100.0
        }
    );
    assert_eq!(c.scroll_offset(), -40.0);
    assert_eq!(c.direction(), ScrollDirection::Leading);
    assert_eq!(positions(&c, 320.0, |_| 100.0), before[1..].to_vec());
}

#[test]
fn trailing_materializes_reversed_source_in_reverse_order() {
    let mut c = abc(DirectionMode::Fixed(ScrollDirection::Trailing));
    settle(&mut c, 320.0, width_100);
    assert_eq!(c.size(), 4);
    assert_eq!(
        c.identities(),
        vec![
            ItemIdentity::new("C", 1),
            ItemIdentity::new("A", 0),
            ItemIdentity::new("B", 0),
            ItemIdentity::new("C", 0),
        ]
    );
    assert_eq!(c.trim_candidate().identity, ItemIdentity::new("C", 0));

    c.set_scroll_offset(151.0);
    settle(&mut c, 320.0, width_100);
    assert_eq!(c.base_offset(), 1);
    assert_eq!(c.scroll_offset(), 41.0);
    assert_eq!(c.identities().last(), Some(&ItemIdentity::new("B", 0)));
}

#[test]
fn fixed_direction_never_trims_on_the_wrong_side() {
    let mut c = abc(DirectionMode::Fixed(ScrollDirection::Leading));
    settle(&mut c, 320.0, width_100);
    c.set_scroll_offset(500.0);
    let changes = settle(&mut c, 320.0, width_100);
    assert!(
        changes
            .iter()
            .all(|o| matches!(o, LayoutOutcome::Grew { .. }))
    );
    assert_eq!(c.base_offset(), 0);
    assert_eq!(c.scroll_offset(), 500.0);
}

#[test]
fn bidirectional_follows_offset_sign() {
    let mut c = abc(DirectionMode::Bidirectional {
        initial: ScrollDirection::Trailing,
    });
    assert_eq!(c.direction(), ScrollDirection::Trailing);

    c.set_scroll_offset(-5.0);
    assert_eq!(c.direction(), ScrollDirection::Leading);

    c.set_scroll_offset(0.0);
    assert_eq!(c.direction(), ScrollDirection::Leading);

    // Writes through a shared handle are picked up immediately.
    c.offset_handle().clone().set(3.0);
    assert_eq!(c.direction(), ScrollDirection::Trailing);
}

#[test]
fn missing_measurement_defers_trim() {
    let mut c = abc(DirectionMode::default());
    settle(&mut c, 320.0, width_100);
    c.set_scroll_offset(-151.0);
    c.reset_measurements();

    assert_eq!(c.apply_layout(1000.0, 320.0), LayoutOutcome::TrimDeferred);
    assert_eq!(c.base_offset(), 0);
    assert_eq!(c.scroll_offset(), -151.0);

    c.measure(ItemIdentity::new("A", 0), Size::new(100.0, 100.0));
    assert!(matches!(
        c.apply_layout(1000.0, 320.0),
        LayoutOutcome::Trimmed { .. }
    ));
}

#[test]
fn stale_measurements_are_harmless() {
    let mut c = abc(DirectionMode::default());
    c.measure(ItemIdentity::new("Z", 42), Size::new(1.0, 1.0));
    settle(&mut c, 320.0, width_100);
    assert_eq!(c.size(), 4);
    assert!(c.size_cache().contains(&ItemIdentity::new("Z", 42)));
}

#[test]
fn identities_are_distinct_with_duplicate_keys() {
    let mut c = Carousel::new(
        CarouselOptions::new(["A", "A", "B", "A"]).with_safety_padding(0.0),
        ScrollOffset::default(),
    );
    for _ in 0..11 {
        c.apply_layout(0.0, 10_000.0);
    }
    assert_eq!(c.size(), 12);

    let ids = c.identities();
    let unique: HashSet<_> = ids.iter().cloned().collect();
    assert_eq!(unique.len(), ids.len());
    assert_eq!(ids[1].key, "A");
    assert_eq!(ids[1].occurrence, 1);
    assert_eq!(ids[3].occurrence, 2);
    assert_eq!(ids[2].occurrence, 0);
}

#[test]
fn window_changes_by_at_most_one_and_never_below_one() {
    let mut rng = Lcg::new(42);
    for direction in [
        DirectionMode::Fixed(ScrollDirection::Leading),
        DirectionMode::Fixed(ScrollDirection::Trailing),
        DirectionMode::Bidirectional {
            initial: ScrollDirection::Leading,
        },
    ] {
        let mut c = Carousel::new(
            CarouselOptions::new_with_key((0..5u32).collect::<Vec<_>>(), |v: &u32| *v)
                .with_spacing(4.0)
                .with_direction(direction),
            ScrollOffset::default(),
        );
        let widths: Vec<f64> = (0..5).map(|_| rng.gen_range_f64(20.0, 180.0)).collect();
        let mut last_base = c.base_offset();
        for _ in 0..2000 {
            let delta = rng.gen_range_f64(-50.0, 50.0);
            c.offset_handle().add(delta);
            let before = c.size();
            layout_pass(&mut c, rng.gen_range_f64(0.0, 600.0), |v, _| widths[*v as usize]);
            let after = c.size();
            assert!(after >= 1);
            assert!(before.abs_diff(after) <= 1);
            assert!(c.base_offset() >= last_base);
            assert!(c.base_offset() - last_base <= 1);
            last_base = c.base_offset();
        }
    }
}

#[test]
fn steady_drift_keeps_window_bounded() {
    let mut rng = Lcg::new(9);
    let widths: Vec<f64> = (0..7).map(|_| rng.gen_range_f64(60.0, 140.0)).collect();
    let mut c = Carousel::new(
        CarouselOptions::new_with_key((0..7usize).collect::<Vec<_>>(), |v: &usize| *v)
            .with_max_offset_abs_delta(10.0),
        ScrollOffset::default(),
    );
    for _ in 0..20_000 {
        c.offset_handle().add(-10.0);
        layout_pass(&mut c, 400.0, |v, _| widths[*v]);
        assert!(c.size() <= 16, "window grew to {}", c.size());
        assert!(c.measurement_cache_len() <= 16);
    }
    assert!(c.base_offset() > 1000);
    assert!(c.scroll_offset() <= 0.0);
    assert!(c.scroll_offset() > -200.0);
}

#[test]
fn growth_is_capped_by_max_size() {
    let mut c = Carousel::new(
        CarouselOptions::new([1, 2, 3]).with_max_size(5),
        ScrollOffset::default(),
    );
    for _ in 0..50 {
        c.apply_layout(0.0, 1000.0);
    }
    assert_eq!(c.size(), 5);
}

#[test]
fn non_finite_inputs_are_skipped() {
    let mut c = abc(DirectionMode::default());
    assert_eq!(c.apply_layout(f64::NAN, 320.0), LayoutOutcome::Skipped);
    assert_eq!(c.apply_layout(100.0, f64::INFINITY), LayoutOutcome::Skipped);
    c.set_scroll_offset(f64::NEG_INFINITY);
    assert_eq!(c.apply_layout(100.0, 320.0), LayoutOutcome::Skipped);
    assert_eq!(c.size(), 1);
}

#[test]
fn degenerate_offsets_do_not_break_growth() {
    let mut c = abc(DirectionMode::default());
    c.set_scroll_offset(-10_000.0);
    let changes = settle(&mut c, 320.0, width_100);
    assert!(!changes.is_empty());
    assert!(c.size() >= 4);
}

#[test]
fn on_change_fires_for_growth_and_trim() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let mut c = Carousel::new(
        CarouselOptions::new(["A", "B", "C"])
            .with_safety_padding(0.0)
            .with_on_change(Some(move |_: &Carousel<&'static str, &'static str>| {
                seen.fetch_add(1, Ordering::SeqCst);
            })),
        ScrollOffset::default(),
    );
    settle(&mut c, 320.0, width_100);
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    c.set_scroll_offset(-151.0);
    let changes = settle(&mut c, 320.0, width_100);
    assert_eq!(calls.load(Ordering::SeqCst), 3 + changes.len());
}

#[test]
fn render_pairs_content_with_identity() {
    let mut c = abc(DirectionMode::default());
    settle(&mut c, 320.0, width_100);
    let rendered = c.render(|s, batch| std::format!("{s}#{batch}"));
    let labels: Vec<_> = rendered.iter().map(|(r, _)| r.as_str()).collect();
    assert_eq!(labels, vec!["A#0", "B#0", "C#0", "A#1"]);
    assert_eq!(rendered[3].1, ItemIdentity::new("A", 1));
}

#[test]
fn measured_row_width_requires_every_item() {
    let mut c = abc(DirectionMode::default());
    settle(&mut c, 320.0, width_100);
    assert_eq!(c.measured_row_width(), Some(430.0));

    c.reset_measurements();
    assert_eq!(c.measured_row_width(), None);
}

#[test]
fn measurement_cache_roundtrip() {
    let mut c = abc(DirectionMode::default());
    settle(&mut c, 320.0, width_100);
    let exported = c.export_measurement_cache();
    assert_eq!(exported.len(), 4);

    let mut d = abc(DirectionMode::default());
    d.restore_window_state(c.window_state());
    d.import_measurement_cache(exported);
    assert_eq!(d.measured_row_width(), Some(430.0));
    assert_eq!(d.window_state(), c.window_state());
}

#[test]
fn restore_clamps_window_size() {
    let mut c = abc(DirectionMode::default());
    c.restore_window_state(WindowState {
        size: 0,
        base_offset: 7,
        scroll_offset: -3.0,
    });
    assert_eq!(c.size(), 1);
    assert_eq!(c.base_offset(), 7);
    assert_eq!(c.logical_range(), 7..8);
    assert_eq!(c.scroll_offset(), -3.0);
}

#[test]
fn set_options_rebuilds_duplicate_bookkeeping_for_new_source() {
    let mut c = abc(DirectionMode::default());
    c.update_options(|o| {
        o.source = Arc::from(vec!["X", "X"]);
        o.max_offset_abs_delta = 20.0;
    });
    c.apply_layout(0.0, 1000.0);
    let ids = c.identities();
    assert_eq!(ids[0].occurrence, 0);
    assert_eq!(ids[1].occurrence, 1);
    assert_eq!(c.advance_margin(), 20.0);
}

#[test]
fn shared_offset_handle_is_the_same_cell() {
    let offset = ScrollOffset::new(-0.5);
    let c = Carousel::new(CarouselOptions::new([1u8]), offset.clone());
    assert!(c.offset_handle().shares(&offset));
    offset.add(-10.0);
    assert_eq!(c.scroll_offset(), -10.5);
}
