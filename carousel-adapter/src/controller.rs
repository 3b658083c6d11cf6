use alloc::boxed::Box;
use alloc::vec::Vec;

use carousel::{Carousel, CarouselKey, ItemIdentity, LayoutOutcome, Size};

use crate::{Drift, Placement, place_row, row_width};

/// A framework-neutral controller that wraps a `carousel::Carousel` and runs whole frames.
///
/// It owns the `render_item` callback and an optional [`Drift`]. Adapters drive it by calling:
/// - `tick(now_ms)` each frame/timer tick to advance the offset
/// - `layout_pass(viewport_width, measure)` after laying out the rendered items
///
/// `frame` does both.
pub struct Controller<E, K, R> {
    c: Carousel<E, K>,
    render_item: Box<dyn Fn(&E, i64) -> R>,
    drift: Option<Drift>,
}

impl<E, K: CarouselKey, R> Controller<E, K, R> {
    pub fn new(c: Carousel<E, K>, render_item: impl Fn(&E, i64) -> R + 'static) -> Self {
        Self {
            c,
            render_item: Box::new(render_item),
            drift: None,
        }
    }

    pub fn carousel(&self) -> &Carousel<E, K> {
        &self.c
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel<E, K> {
        &mut self.c
    }

    pub fn into_carousel(self) -> Carousel<E, K> {
        self.c
    }

    /// Renders the current window in row order.
    pub fn materialize(&self) -> Vec<(R, ItemIdentity<K>)> {
        self.c.render(|element, batch| (self.render_item)(element, batch))
    }

    /// Starts driving the offset. Replaces any previous drift.
    ///
    /// Steps larger than the carousel's `max_offset_abs_delta` can make items pop in or vanish
    /// while still visible.
    pub fn start_drift(&mut self, drift: Drift) {
        #[cfg(feature = "tracing")]
        {
            let step = drift.step().abs();
            if step > self.c.options().max_offset_abs_delta {
                tracing::warn!(
                    target: "carousel",
                    step,
                    max_offset_abs_delta = self.c.options().max_offset_abs_delta,
                    "drift step exceeds max_offset_abs_delta"
                );
            }
        }
        self.drift = Some(drift);
    }

    pub fn stop_drift(&mut self) {
        self.drift = None;
    }

    pub fn drift(&self) -> Option<&Drift> {
        self.drift.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.drift.as_ref().is_some_and(|d| !d.is_paused())
    }

    pub fn pause(&mut self) {
        if let Some(drift) = &mut self.drift {
            drift.pause();
        }
    }

    pub fn resume(&mut self) {
        if let Some(drift) = &mut self.drift {
            drift.resume();
        }
    }

    /// Advances the drift and applies the delta to the shared offset.
    ///
    /// Returns the new offset, or `None` when nothing is animating.
    pub fn tick(&mut self, now_ms: u64) -> Option<f64> {
        let drift = self.drift.as_mut()?;
        if drift.is_paused() {
            return None;
        }
        let delta = drift.tick(now_ms);
        Some(self.c.offset_handle().add(delta))
    }

    /// Renders the window, measures every item with `measure`, and reports the pass.
    pub fn layout_pass(
        &mut self,
        viewport_width: f64,
        mut measure: impl FnMut(&R) -> Size,
    ) -> LayoutOutcome<K> {
        let measurements: Vec<(ItemIdentity<K>, Size)> = self
            .materialize()
            .into_iter()
            .map(|(rendered, identity)| (identity, measure(&rendered)))
            .collect();
        let total = row_width(
            measurements.iter().map(|(_, size)| size.width),
            self.c.options().spacing,
        );
        self.c.on_layout_pass(total, viewport_width, measurements)
    }

    /// `tick` followed by `layout_pass`.
    pub fn frame(
        &mut self,
        now_ms: u64,
        viewport_width: f64,
        measure: impl FnMut(&R) -> Size,
    ) -> LayoutOutcome<K> {
        self.tick(now_ms);
        self.layout_pass(viewport_width, measure)
    }

    /// Runs layout passes until the window stops changing or `max_passes` is reached.
    ///
    /// Returns the number of passes that changed the window.
    pub fn settle(
        &mut self,
        viewport_width: f64,
        mut measure: impl FnMut(&R) -> Size,
        max_passes: usize,
    ) -> usize {
        let mut changed = 0;
        for _ in 0..max_passes {
            if !self.layout_pass(viewport_width, &mut measure).changed_window() {
                break;
            }
            changed += 1;
        }
        changed
    }

    /// On-screen placement of the current window from cached measurements.
    ///
    /// Returns `None` while any materialized item is unmeasured.
    pub fn placements(&self, viewport_width: f64) -> Option<Vec<Placement<K>>> {
        let mut items = Vec::with_capacity(self.c.size());
        for identity in self.c.identities() {
            let size = self.c.size_cache().get(&identity)?;
            items.push((identity, size.width));
        }
        Some(place_row(
            items,
            self.c.options().spacing,
            self.c.scroll_offset(),
            viewport_width,
            self.c.direction(),
        ))
    }
}

impl<E, K, R> core::fmt::Debug for Controller<E, K, R>
where
    E: core::fmt::Debug,
    K: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Controller")
            .field("carousel", &self.c)
            .field("drift", &self.drift)
            .finish_non_exhaustive()
    }
}
