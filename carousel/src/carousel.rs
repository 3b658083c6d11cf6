use alloc::sync::Arc;
use alloc::vec::Vec;
use core::ops::Range;

use crate::cyclic::resolve;
use crate::size_cache::{CarouselKey, KeyMap};
use crate::types::abs;
use crate::{
    CarouselItem, CarouselOptions, DirectionMode, ItemIdentity, LayoutOutcome, ScrollDirection,
    ScrollOffset, Size, SizeCache, Traversal, WindowState,
};

/// An infinite, measurement-driven carousel window.
///
/// The carousel materializes a contiguous run of logical indexes over a cyclically repeated
/// source and keeps that run just large enough to cover the viewport:
/// - After each layout pass, the renderer reports the width of the whole materialized row and
///   the size of every item (`on_layout_pass`).
/// - If the row is about to run out, the window grows by one item.
/// - Otherwise, once the boundary item is far enough offscreen, it is dropped and the scroll
///   offset is shifted back by its width plus spacing, so the remaining items stay put.
///
/// The carousel does not hold any UI objects and never drives the scroll offset itself. The
/// offset lives in a [`ScrollOffset`] cell shared with the animation driver.
#[derive(Debug)]
pub struct Carousel<E, K> {
    options: CarouselOptions<E, K>,
    occurrences: Vec<u32>,
    size: usize,
    base_offset: i64,
    offset: ScrollOffset,
    last_direction: ScrollDirection,
    sizes: SizeCache<K>,
}

impl<E, K: CarouselKey> Carousel<E, K> {
    /// Creates a carousel with a window of one item at logical index `0`.
    ///
    /// The source may only be empty if the carousel is never materialized; any attempt to
    /// materialize an empty source panics.
    pub fn new(options: CarouselOptions<E, K>, offset: ScrollOffset) -> Self {
        debug_assert!(options.spacing >= 0.0, "spacing must not be negative");
        debug_assert!(
            options.max_offset_abs_delta > 0.0,
            "max_offset_abs_delta must be positive"
        );
        debug_assert!(options.max_size >= 1, "max_size must be at least 1");
        cdebug!(
            source_len = options.source.len(),
            spacing = options.spacing,
            max_offset_abs_delta = options.max_offset_abs_delta,
            safety_padding = options.safety_padding,
            "Carousel::new"
        );
        let mut c = Self {
            occurrences: Vec::new(),
            size: 1,
            base_offset: 0,
            offset,
            last_direction: options.direction.initial(),
            sizes: SizeCache::new(),
            options,
        };
        c.rebuild_occurrences();
        c.sync_direction();
        c
    }

    pub fn options(&self) -> &CarouselOptions<E, K> {
        &self.options
    }

    /// Replaces the options.
    ///
    /// The window and the size cache are kept. Duplicate-key bookkeeping is rebuilt when the
    /// source or the key extractor changed.
    pub fn set_options(&mut self, options: CarouselOptions<E, K>) {
        let source_unchanged = Arc::ptr_eq(&self.options.source, &options.source);
        let key_unchanged = Arc::ptr_eq(&self.options.get_item_key, &options.get_item_key);
        let direction_changed = self.options.direction != options.direction;
        self.options = options;
        cdebug!(
            source_len = self.options.source.len(),
            spacing = self.options.spacing,
            max_offset_abs_delta = self.options.max_offset_abs_delta,
            "Carousel::set_options"
        );

        if !source_unchanged || !key_unchanged {
            self.rebuild_occurrences();
        }
        if direction_changed {
            self.last_direction = self.options.direction.initial();
            self.sync_direction();
        }
        if self.size > self.options.max_size {
            self.size = self.options.max_size.max(1);
        }
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut CarouselOptions<E, K>)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_source(&mut self, source: impl Into<Arc<[E]>>) {
        self.options.source = source.into();
        self.rebuild_occurrences();
    }

    pub fn set_spacing(&mut self, spacing: f64) {
        debug_assert!(spacing >= 0.0, "spacing must not be negative");
        self.options.spacing = spacing;
    }

    pub fn set_max_offset_abs_delta(&mut self, max_offset_abs_delta: f64) {
        debug_assert!(
            max_offset_abs_delta > 0.0,
            "max_offset_abs_delta must be positive"
        );
        self.options.max_offset_abs_delta = max_offset_abs_delta;
    }

    pub fn set_safety_padding(&mut self, safety_padding: f64) {
        self.options.safety_padding = safety_padding;
    }

    pub fn set_direction_mode(&mut self, direction: DirectionMode) {
        if self.options.direction == direction {
            return;
        }
        self.options.direction = direction;
        self.last_direction = direction.initial();
        self.sync_direction();
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&Carousel<E, K>) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    fn rebuild_occurrences(&mut self) {
        let mut seen = KeyMap::<K, u32>::new();
        self.occurrences.clear();
        self.occurrences.reserve_exact(self.options.source.len());
        for element in self.options.source.iter() {
            let count = seen.entry((self.options.get_item_key)(element)).or_insert(0);
            self.occurrences.push(*count);
            *count += 1;
        }
    }

    fn notify(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    pub fn source(&self) -> &[E] {
        &self.options.source
    }

    /// Number of materialized items.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Logical index of the first item consumed by the window.
    pub fn base_offset(&self) -> i64 {
        self.base_offset
    }

    pub fn logical_range(&self) -> Range<i64> {
        self.base_offset..self.base_offset + self.size as i64
    }

    pub fn advance_margin(&self) -> f64 {
        self.options.advance_margin()
    }

    pub fn scroll_offset(&self) -> f64 {
        self.offset.get()
    }

    /// Sets the scroll offset directly (e.g. when resetting a demo).
    ///
    /// Animation drivers usually write through a cloned [`ScrollOffset`] handle instead.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.offset.set(offset);
        self.sync_direction();
    }

    /// The shared offset cell. Clone it to hand it to an animation driver.
    pub fn offset_handle(&self) -> &ScrollOffset {
        &self.offset
    }

    /// The direction the window is currently materialized for.
    pub fn direction(&self) -> ScrollDirection {
        match self.options.direction {
            DirectionMode::Fixed(direction) => direction,
            DirectionMode::Bidirectional { .. } => {
                ScrollDirection::from_offset(self.offset.get()).unwrap_or(self.last_direction)
            }
        }
    }

    fn sync_direction(&mut self) {
        self.last_direction = self.direction();
    }

    /// Returns a lightweight snapshot of the window.
    pub fn window_state(&self) -> WindowState {
        WindowState {
            size: self.size,
            base_offset: self.base_offset,
            scroll_offset: self.offset.get(),
        }
    }

    /// Restores a previously captured snapshot. Sizes are clamped to `1..=max_size`.
    pub fn restore_window_state(&mut self, state: WindowState) {
        self.size = state.size.clamp(1, self.options.max_size.max(1));
        self.base_offset = state.base_offset;
        self.offset.set(state.scroll_offset);
        self.sync_direction();
        cdebug!(
            size = self.size,
            base_offset = self.base_offset,
            "restore_window_state"
        );
    }

    fn item_at(&self, logical_index: i64, traversal: Traversal) -> CarouselItem<'_, E, K> {
        let resolved = resolve(logical_index, self.options.source.len(), traversal);
        let element = &self.options.source[resolved.source_index];
        CarouselItem {
            element,
            identity: ItemIdentity {
                key: (self.options.get_item_key)(element),
                batch: resolved.batch,
                occurrence: self.occurrences[resolved.source_index],
            },
            logical_index,
            source_index: resolved.source_index,
        }
    }

    /// Visits the materialized items in row order (leading edge first) without allocations.
    ///
    /// For [`ScrollDirection::Trailing`] the source is consulted back to front and the window is
    /// walked from its far end, so the sequence still reads forward and the item at
    /// `base_offset` ends up at the trailing edge.
    ///
    /// # Panics
    ///
    /// Panics if the source is empty.
    pub fn for_each_item<'a>(&'a self, mut f: impl FnMut(CarouselItem<'a, E, K>)) {
        let direction = self.direction();
        let traversal = direction.traversal();
        match direction {
            ScrollDirection::Leading => {
                for i in self.logical_range() {
                    f(self.item_at(i, traversal));
                }
            }
            ScrollDirection::Trailing => {
                for i in self.logical_range().rev() {
                    f(self.item_at(i, traversal));
                }
            }
        }
    }

    /// Returns the materialized items in row order. See [`Carousel::for_each_item`].
    pub fn materialize(&self) -> Vec<CarouselItem<'_, E, K>> {
        let mut out = Vec::with_capacity(self.size);
        self.for_each_item(|item| out.push(item));
        out
    }

    /// Renders every materialized item with `render_item(element, batch)`.
    pub fn render<R>(
        &self,
        mut render_item: impl FnMut(&E, i64) -> R,
    ) -> Vec<(R, ItemIdentity<K>)> {
        let mut out = Vec::with_capacity(self.size);
        self.for_each_item(|item| {
            out.push((render_item(item.element, item.identity.batch), item.identity));
        });
        out
    }

    pub fn identities(&self) -> Vec<ItemIdentity<K>> {
        let mut out = Vec::with_capacity(self.size);
        self.for_each_item(|item| out.push(item.identity));
        out
    }

    /// The item that will be dropped next once it is offscreen.
    pub fn trim_candidate(&self) -> CarouselItem<'_, E, K> {
        self.item_at(self.base_offset, self.direction().traversal())
    }

    pub fn size_cache(&self) -> &SizeCache<K> {
        &self.sizes
    }

    /// Returns the number of cached measured sizes.
    pub fn measurement_cache_len(&self) -> usize {
        self.sizes.len()
    }

    pub fn reset_measurements(&mut self) {
        self.sizes.clear();
    }

    /// Exports the cached measured sizes as a `Vec` (useful for persistence).
    pub fn export_measurement_cache(&self) -> Vec<(ItemIdentity<K>, Size)> {
        self.sizes
            .iter()
            .map(|(identity, size)| (identity.clone(), *size))
            .collect()
    }

    /// Replaces the cached measured sizes.
    pub fn import_measurement_cache(
        &mut self,
        entries: impl IntoIterator<Item = (ItemIdentity<K>, Size)>,
    ) {
        self.sizes.clear();
        self.sizes.extend(entries);
        cdebug!(entries = self.sizes.len(), "import_measurement_cache");
    }

    /// Records the measured size of one item.
    ///
    /// Measurements for items that are no longer materialized are accepted and simply never
    /// consulted.
    pub fn measure(&mut self, identity: ItemIdentity<K>, size: Size) {
        self.sizes.insert(identity, size);
    }

    pub fn measure_many(
        &mut self,
        measurements: impl IntoIterator<Item = (ItemIdentity<K>, Size)>,
    ) {
        self.sizes.extend(measurements);
    }

    /// Width of the materialized row computed from cached sizes, including spacing.
    ///
    /// Returns `None` while any materialized item is unmeasured.
    pub fn measured_row_width(&self) -> Option<f64> {
        let mut total = 0.0;
        let mut missing = false;
        self.for_each_item(|item| match self.sizes.get(&item.identity) {
            Some(size) => total += size.width,
            None => missing = true,
        });
        if missing {
            return None;
        }
        Some(total + self.options.spacing * (self.size - 1) as f64)
    }

    /// Feeds the result of a layout pass: per-item measurements first, then the row width.
    ///
    /// `total_width` is the width of the whole materialized row including spacing, independent
    /// of the scroll offset; `viewport_width` is the width of the clipping region.
    pub fn on_layout_pass(
        &mut self,
        total_width: f64,
        viewport_width: f64,
        measurements: impl IntoIterator<Item = (ItemIdentity<K>, Size)>,
    ) -> LayoutOutcome<K> {
        self.measure_many(measurements);
        self.apply_layout(total_width, viewport_width)
    }

    /// Runs one step of the grow/trim loop against the current scroll offset.
    ///
    /// At most one item is added or removed per call. Growth wins over trimming.
    pub fn apply_layout(&mut self, total_width: f64, viewport_width: f64) -> LayoutOutcome<K> {
        let offset = self.offset.get();
        if !total_width.is_finite() || !viewport_width.is_finite() || !offset.is_finite() {
            cwarn!(
                total_width,
                viewport_width,
                offset,
                "apply_layout: ignoring non-finite input"
            );
            return LayoutOutcome::Skipped;
        }
        self.sync_direction();

        let outcome = self.step(offset, total_width, viewport_width);
        if outcome.changed_window() {
            self.notify();
        }
        outcome
    }

    fn step(&mut self, offset: f64, total_width: f64, viewport_width: f64) -> LayoutOutcome<K> {
        let visible_slack = total_width - abs(offset);
        if visible_slack < viewport_width + self.advance_margin() {
            if self.size < self.options.max_size {
                self.size += 1;
                ctrace!(size = self.size, visible_slack, viewport_width, "grow");
                return LayoutOutcome::Grew { size: self.size };
            }
            cwarn!(
                max_size = self.options.max_size,
                visible_slack,
                "window is at max_size; not growing"
            );
        }
        self.try_trim(offset)
    }

    fn try_trim(&mut self, offset: f64) -> LayoutOutcome<K> {
        if self.size <= 1 {
            return LayoutOutcome::Stable;
        }
        let direction = self.direction();
        let candidate = self.trim_candidate().identity;
        let Some(measured) = self.sizes.get(&candidate) else {
            ctrace!(
                base_offset = self.base_offset,
                "trim deferred: candidate not measured"
            );
            return LayoutOutcome::TrimDeferred;
        };

        let progress = direction.progress(offset);
        if progress - measured.width <= self.options.max_offset_abs_delta {
            return LayoutOutcome::Stable;
        }

        let shift = measured.width + self.options.spacing;
        let bidirectional = matches!(self.options.direction, DirectionMode::Bidirectional { .. });
        if bidirectional && progress < shift {
            // Compensating now would push the offset across zero and flip the row.
            ctrace!(progress, shift, "trim held: compensation would cross zero");
            return LayoutOutcome::Stable;
        }
        self.offset.set(direction.compensate(offset, shift));
        self.size -= 1;
        self.base_offset += 1;
        self.sizes.remove(&candidate);
        cdebug!(
            size = self.size,
            base_offset = self.base_offset,
            width = measured.width,
            offset = self.offset.get(),
            "trim"
        );
        LayoutOutcome::Trimmed {
            identity: candidate,
            width: measured.width,
        }
    }
}
