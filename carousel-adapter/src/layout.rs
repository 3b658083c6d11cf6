use alloc::vec::Vec;

use carousel::{ItemIdentity, ScrollDirection};

/// Where a materialized item lands on screen, in viewport coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement<K> {
    pub identity: ItemIdentity<K>,
    /// Leading edge of the item.
    pub x: f64,
    pub width: f64,
}

impl<K> Placement<K> {
    pub fn end(&self) -> f64 {
        self.x + self.width
    }

    /// Whether any part of the item intersects `0..viewport_width`.
    pub fn is_visible(&self, viewport_width: f64) -> bool {
        self.end() > 0.0 && self.x < viewport_width
    }
}

/// Width of a row of items separated by `spacing`.
pub fn row_width(widths: impl IntoIterator<Item = f64>, spacing: f64) -> f64 {
    let mut total = 0.0;
    let mut count = 0usize;
    for w in widths {
        total += w;
        count += 1;
    }
    if count == 0 {
        return 0.0;
    }
    total + spacing * (count - 1) as f64
}

/// Places a materialized row (in row order, as returned by `Carousel::materialize`).
///
/// For [`ScrollDirection::Leading`] the row starts at the leading edge of the viewport; for
/// [`ScrollDirection::Trailing`] it ends at the trailing edge. Either way it is then shifted by
/// `scroll_offset`.
pub fn place_row<K>(
    items: impl IntoIterator<Item = (ItemIdentity<K>, f64)>,
    spacing: f64,
    scroll_offset: f64,
    viewport_width: f64,
    direction: ScrollDirection,
) -> Vec<Placement<K>> {
    let items: Vec<(ItemIdentity<K>, f64)> = items.into_iter().collect();
    let total = row_width(items.iter().map(|(_, w)| *w), spacing);
    let mut x = match direction {
        ScrollDirection::Leading => scroll_offset,
        ScrollDirection::Trailing => viewport_width + scroll_offset - total,
    };

    let mut out = Vec::with_capacity(items.len());
    for (identity, width) in items {
        out.push(Placement { identity, x, width });
        x += width + spacing;
    }
    out
}
