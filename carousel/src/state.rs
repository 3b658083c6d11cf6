use core::ops::Range;

/// A lightweight, serializable snapshot of the carousel window.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowState {
    /// Number of materialized items. Never below 1.
    pub size: usize,
    /// Logical index of the trim candidate. Only ever increases.
    pub base_offset: i64,
    pub scroll_offset: f64,
}

impl WindowState {
    /// Logical indexes covered by the window.
    pub fn logical_range(&self) -> Range<i64> {
        self.base_offset..self.base_offset + self.size as i64
    }
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            size: 1,
            base_offset: 0,
            scroll_offset: 0.0,
        }
    }
}
