use alloc::rc::Rc;
use core::cell::Cell;

/// A scroll offset shared between the carousel and whatever animates it.
///
/// Cloning the handle shares the same cell. The animation driver advances the value; the
/// carousel only reads it, except when compensating for a trimmed item.
#[derive(Clone, Debug, Default)]
pub struct ScrollOffset(Rc<Cell<f64>>);

impl ScrollOffset {
    pub fn new(offset: f64) -> Self {
        Self(Rc::new(Cell::new(offset)))
    }

    pub fn get(&self) -> f64 {
        self.0.get()
    }

    pub fn set(&self, offset: f64) {
        self.0.set(offset);
    }

    /// Adds `delta` and returns the new offset.
    pub fn add(&self, delta: f64) -> f64 {
        let next = self.0.get() + delta;
        self.0.set(next);
        next
    }

    /// Whether both handles point at the same cell.
    pub fn shares(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
