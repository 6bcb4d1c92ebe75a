//! Stack index normalization
//!
//! Absolute indices are 1-based from the bottom; negative indices count down
//! from the top (-1 is the top). Index 0 never names a value.

/// Convert a top-relative index into an absolute one for a stack of `depth`
/// values. Absolute indices pass through unchanged.
///
/// The result stays valid while values are pushed above it, which a
/// top-relative index does not.
pub fn absolute_index(index: i32, depth: usize) -> i32 {
    if index < 0 {
        let depth = i32::try_from(depth).unwrap_or(i32::MAX);
        index.saturating_add(depth).saturating_add(1)
    } else {
        index
    }
}

/// Zero-based storage slot for `index`, or `None` if it names no value.
pub fn slot_index(index: i32, depth: usize) -> Option<usize> {
    let absolute = absolute_index(index, depth);
    if absolute >= 1 && absolute as usize <= depth {
        Some(absolute as usize - 1)
    } else {
        None
    }
}
