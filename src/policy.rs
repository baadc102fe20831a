//! Growth policy for `LinearHashMap`.
//!
//! The table keeps its load factor strictly below `1 / LOAD_DENOMINATOR`. Before every
//! insertion the table checks whether `LOAD_DENOMINATOR * (len + 1)` still fits below its
//! capacity; if not it is rebuilt with `GROWTH_FACTOR * (len + 1)` slots, which leaves it at
//! roughly one eighth full right after the rebuild.

/// Before every insertion the table must satisfy `LOAD_DENOMINATOR * (len + 1) < capacity`
pub const LOAD_DENOMINATOR: usize = 4;

/// Multiplier applied to `len + 1` to get the capacity of a rebuilt table
pub const GROWTH_FACTOR: usize = 8;

/// Returns true if a table holding `len` entries in `capacity` slots must grow before it can
/// accept one more entry.
///
/// An unallocated table (`capacity == 0`) always needs to grow.
#[must_use]
pub const fn needs_growth(len: usize, capacity: usize) -> bool {
    LOAD_DENOMINATOR.saturating_mul(len.saturating_add(1)) >= capacity
}

/// Returns the capacity a table holding `len` entries is rebuilt into
#[must_use]
pub const fn grown_capacity(len: usize) -> usize {
    GROWTH_FACTOR.saturating_mul(len.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_needs_growth() {
        assert!(needs_growth(0, 0));
        assert_eq!(grown_capacity(0), 8);
        assert!(!needs_growth(0, grown_capacity(0)));
    }

    #[test]
    fn test_threshold_boundary() {
        // 4 * (1 + 1) = 8 is not strictly below 8
        assert!(needs_growth(1, 8));
        assert!(!needs_growth(1, 9));
        assert!(needs_growth(3, 16));
        assert!(!needs_growth(2, 16));
    }

    #[test]
    fn test_grown_capacity_satisfies_bound_for_next_insert() {
        for len in 0..1_000 {
            let capacity = grown_capacity(len);
            // The insertion that triggered the rebuild leaves len + 1 entries behind
            assert!(LOAD_DENOMINATOR * (len + 1) < capacity, "len = {len}");
            assert!(!needs_growth(len, capacity));
        }
    }

    #[test]
    fn test_saturates_instead_of_overflowing() {
        assert_eq!(grown_capacity(usize::MAX), usize::MAX);
        assert!(needs_growth(usize::MAX, usize::MAX));
    }
}
