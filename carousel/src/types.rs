/// Order in which the source is consulted when resolving a logical index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Traversal {
    Forward,
    Reversed,
}

/// Direction of content motion.
///
/// - `Leading`: content moves toward the leading edge, the offset goes negative and the row is
///   anchored at the leading edge of the viewport.
/// - `Trailing`: content moves toward the trailing edge, the offset goes positive and the row is
///   anchored at the trailing edge of the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Leading,
    Trailing,
}

impl ScrollDirection {
    /// Picks a direction from the sign of a scroll offset. Zero (and NaN) has no direction.
    pub fn from_offset(offset: f64) -> Option<Self> {
        if offset < 0.0 {
            Some(Self::Leading)
        } else if offset > 0.0 {
            Some(Self::Trailing)
        } else {
            None
        }
    }

    pub fn traversal(self) -> Traversal {
        match self {
            Self::Leading => Traversal::Forward,
            Self::Trailing => Traversal::Reversed,
        }
    }

    /// Distance travelled along this direction for a given offset.
    ///
    /// Negative when the offset sits on the wrong side of zero.
    pub fn progress(self, offset: f64) -> f64 {
        match self {
            Self::Leading => -offset,
            Self::Trailing => offset,
        }
    }

    /// Signed offset change that moves `magnitude` along this direction.
    pub fn signed(self, magnitude: f64) -> f64 {
        match self {
            Self::Leading => -abs(magnitude),
            Self::Trailing => abs(magnitude),
        }
    }

    /// Moves `offset` back toward zero by `amount`, undoing `amount` of progress.
    pub(crate) fn compensate(self, offset: f64, amount: f64) -> f64 {
        match self {
            Self::Leading => offset + amount,
            Self::Trailing => offset - amount,
        }
    }
}

/// Which motion directions a carousel supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DirectionMode {
    /// Content only ever moves in one direction.
    Fixed(ScrollDirection),
    /// The direction follows the sign of the scroll offset. An offset of exactly zero keeps the
    /// last resolved direction, starting with `initial`.
    Bidirectional { initial: ScrollDirection },
}

impl DirectionMode {
    pub fn initial(self) -> ScrollDirection {
        match self {
            Self::Fixed(direction) => direction,
            Self::Bidirectional { initial } => initial,
        }
    }
}

impl Default for DirectionMode {
    fn default() -> Self {
        Self::Fixed(ScrollDirection::Leading)
    }
}

/// Measured on-screen size of a materialized item.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Identity of a materialized item.
///
/// The same source element shows up once per batch, so the key alone is not enough to tell
/// copies apart. `occurrence` counts earlier source elements sharing the same key and is `0`
/// for sources with unique keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemIdentity<K> {
    pub key: K,
    pub batch: i64,
    pub occurrence: u32,
}

impl<K> ItemIdentity<K> {
    /// Identity of an element whose key is unique within the source.
    pub fn new(key: K, batch: i64) -> Self {
        Self {
            key,
            batch,
            occurrence: 0,
        }
    }
}

/// A logical index resolved against the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Resolved {
    pub source_index: usize,
    pub batch: i64,
}

/// One entry of the materialized window.
#[derive(Debug)]
pub struct CarouselItem<'a, E, K> {
    pub element: &'a E,
    pub identity: ItemIdentity<K>,
    pub logical_index: i64,
    pub source_index: usize,
}

impl<E, K: Clone> Clone for CarouselItem<'_, E, K> {
    fn clone(&self) -> Self {
        Self {
            element: self.element,
            identity: self.identity.clone(),
            logical_index: self.logical_index,
            source_index: self.source_index,
        }
    }
}

/// What a single layout pass did to the window.
#[derive(Clone, Debug, PartialEq)]
pub enum LayoutOutcome<K> {
    /// One more logical item was appended; `size` is the new window size.
    Grew { size: usize },
    /// The boundary item scrolled fully out of view and was dropped.
    Trimmed { identity: ItemIdentity<K>, width: f64 },
    /// The trim candidate has not been measured yet.
    TrimDeferred,
    /// Nothing to do.
    Stable,
    /// The pass was ignored because an input was not finite.
    Skipped,
}

impl<K> LayoutOutcome<K> {
    /// Whether the pass changed the window size or base offset.
    pub fn changed_window(&self) -> bool {
        matches!(self, Self::Grew { .. } | Self::Trimmed { .. })
    }
}

pub(crate) fn abs(v: f64) -> f64 {
    if v < 0.0 { -v } else { v }
}
