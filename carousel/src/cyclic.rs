use crate::{Resolved, Traversal};

/// Maps a logical index onto the cyclic source.
///
/// `batch` is the floored quotient of `logical_index / source_len`, so negative indexes land in
/// negative batches and the remainder always lies in `0..source_len`. With
/// [`Traversal::Reversed`] the remainder counts from the back of the source.
///
/// # Panics
///
/// Panics if `source_len == 0`.
pub fn resolve(logical_index: i64, source_len: usize, traversal: Traversal) -> Resolved {
    assert!(source_len > 0, "carousel source must not be empty");
    let len = source_len as i64;
    let batch = logical_index.div_euclid(len);
    let remainder = logical_index.rem_euclid(len) as usize;
    let source_index = match traversal {
        Traversal::Forward => remainder,
        Traversal::Reversed => source_len - 1 - remainder,
    };
    Resolved {
        source_index,
        batch,
    }
}
