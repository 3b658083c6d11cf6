use alloc::sync::Arc;

use crate::DirectionMode;
use crate::carousel::Carousel;

/// Default upper bound for a single change of the scroll offset.
pub const DEFAULT_MAX_OFFSET_ABS_DELTA: f64 = 50.0;
/// Default constant padding added to the advance margin. Keeps freshly materialized items far
/// enough offscreen that the renderer never shows a gap while laying them out.
pub const DEFAULT_SAFETY_PADDING: f64 = 200.0;
pub const DEFAULT_SPACING: f64 = 10.0;
pub const DEFAULT_MAX_SIZE: usize = 1024;

/// Extracts the key of a source element.
pub type GetItemKey<E, K> = Arc<dyn Fn(&E) -> K + Send + Sync>;

/// A callback fired after a layout pass grew or trimmed the window.
pub type OnWindowChangeCallback<E, K> = Arc<dyn Fn(&Carousel<E, K>) + Send + Sync>;

/// Configuration for [`crate::Carousel`].
///
/// This type is cheap to clone: the source and closures are stored in `Arc`s, so adapters can
/// tweak a few fields and call `Carousel::set_options` without copying data.
pub struct CarouselOptions<E, K> {
    /// The repeated sequence. Must not be empty.
    pub source: Arc<[E]>,
    pub get_item_key: GetItemKey<E, K>,

    /// Space between adjacent items.
    pub spacing: f64,

    /// Upper bound for the change of the scroll offset between two layout passes.
    ///
    /// Used both as lookahead when growing and as slack before trimming, so a boundary item is
    /// only dropped once it was already offscreen before the most recent move.
    pub max_offset_abs_delta: f64,

    /// Constant padding added on top of `max_offset_abs_delta` when deciding to grow.
    pub safety_padding: f64,

    pub direction: DirectionMode,

    /// Hard cap on the number of materialized items.
    pub max_size: usize,

    pub on_change: Option<OnWindowChangeCallback<E, K>>,
}

impl<E, K> Clone for CarouselOptions<E, K> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            get_item_key: Arc::clone(&self.get_item_key),
            spacing: self.spacing,
            max_offset_abs_delta: self.max_offset_abs_delta,
            safety_padding: self.safety_padding,
            direction: self.direction,
            max_size: self.max_size,
            on_change: self.on_change.clone(),
        }
    }
}

impl<E: Clone + 'static> CarouselOptions<E, E> {
    /// Creates options for a source whose elements are their own keys.
    pub fn new(source: impl Into<Arc<[E]>>) -> Self {
        Self::new_with_key(source, E::clone)
    }
}

impl<E, K> CarouselOptions<E, K> {
    /// Creates options with a custom key extractor.
    ///
    /// The key should be stable for an element so that measurements and animations follow it.
    pub fn new_with_key(
        source: impl Into<Arc<[E]>>,
        get_item_key: impl Fn(&E) -> K + Send + Sync + 'static,
    ) -> Self {
        Self {
            source: source.into(),
            get_item_key: Arc::new(get_item_key),
            spacing: DEFAULT_SPACING,
            max_offset_abs_delta: DEFAULT_MAX_OFFSET_ABS_DELTA,
            safety_padding: DEFAULT_SAFETY_PADDING,
            direction: DirectionMode::default(),
            max_size: DEFAULT_MAX_SIZE,
            on_change: None,
        }
    }

    /// Distance beyond the viewport that must already be covered by materialized content.
    pub fn advance_margin(&self) -> f64 {
        self.max_offset_abs_delta + self.safety_padding
    }

    pub fn with_source(mut self, source: impl Into<Arc<[E]>>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_get_item_key(
        mut self,
        get_item_key: impl Fn(&E) -> K + Send + Sync + 'static,
    ) -> Self {
        self.get_item_key = Arc::new(get_item_key);
        self
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_max_offset_abs_delta(mut self, max_offset_abs_delta: f64) -> Self {
        self.max_offset_abs_delta = max_offset_abs_delta;
        self
    }

    pub fn with_safety_padding(mut self, safety_padding: f64) -> Self {
        self.safety_padding = safety_padding;
        self
    }

    pub fn with_direction(mut self, direction: DirectionMode) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&Carousel<E, K>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl<E, K> core::fmt::Debug for CarouselOptions<E, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CarouselOptions")
            .field("source_len", &self.source.len())
            .field("spacing", &self.spacing)
            .field("max_offset_abs_delta", &self.max_offset_abs_delta)
            .field("safety_padding", &self.safety_padding)
            .field("direction", &self.direction)
            .field("max_size", &self.max_size)
            .finish_non_exhaustive()
    }
}
