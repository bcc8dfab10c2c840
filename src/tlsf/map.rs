//! Size to free-list coordinate mapping.
//!
//! A size maps to a `(fl, sl)` class: `fl` selects a power-of-two band and
//! `sl` one of [`SL_INDEX_COUNT`] linear subdivisions within it. Bands
//! narrower than [`SMALL_BLOCK_SIZE`] are collapsed into row 0, subdivided at
//! the granularity instead.

use super::{FL_INDEX_SHIFT, SL_INDEX_COUNT, SL_INDEX_COUNT_LOG2, SMALL_BLOCK_SIZE};
use crate::bits::fls_sizet;

/// Class of a known block of `size` bytes, rounding down. Used when filing a
/// block on a free list.
pub(super) fn mapping_insert(size: usize) -> (usize, usize) {
    if size < SMALL_BLOCK_SIZE {
        (0, size / (SMALL_BLOCK_SIZE / SL_INDEX_COUNT))
    } else {
        let fl = fls_sizet(size);
        let sl = (size >> (fl - SL_INDEX_COUNT_LOG2)) ^ SL_INDEX_COUNT;
        ((fl - (FL_INDEX_SHIFT - 1)) as usize, sl)
    }
}

/// First class whose every member holds at least `size` bytes, rounding up.
/// Used when searching for a block to satisfy a request.
///
/// The result's `fl` may land one past the table for sizes within one
/// second-level step of the maximum; the bitmap search treats that as
/// unsatisfiable.
pub(super) fn mapping_search(mut size: usize) -> (usize, usize) {
    if size >= (1 << SL_INDEX_COUNT_LOG2) {
        let round = (1 << (fls_sizet(size) - SL_INDEX_COUNT_LOG2)) - 1;
        size += round;
    }
    mapping_insert(size)
}

/// Smallest size filed into class `(fl, sl)`; the inverse of
/// [`mapping_insert`].
#[cfg(test)]
pub(super) fn class_lower_bound(fl: usize, sl: usize) -> usize {
    if fl == 0 {
        sl * (SMALL_BLOCK_SIZE / SL_INDEX_COUNT)
    } else {
        let real_fl = fl as u32 + (FL_INDEX_SHIFT - 1);
        (1usize << real_fl) + (sl << (real_fl - SL_INDEX_COUNT_LOG2))
    }
}

#[cfg(test)]
mod tests {
    use super::super::{ALIGN_SIZE, ALIGN_SIZE_LOG2, BLOCK_SIZE_MAX, BLOCK_SIZE_MIN, FL_INDEX_COUNT};
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn small_sizes_share_row_zero() {
        for size in (0..SMALL_BLOCK_SIZE).step_by(ALIGN_SIZE) {
            let (fl, sl) = mapping_insert(size);
            assert_eq!(fl, 0);
            assert_eq!(sl, size >> ALIGN_SIZE_LOG2);
        }
        let (fl, _) = mapping_insert(SMALL_BLOCK_SIZE);
        assert_eq!(fl, 1);
    }

    #[test]
    fn every_class_round_trips_through_its_lower_bound() {
        for fl in 0..FL_INDEX_COUNT {
            for sl in 0..SL_INDEX_COUNT {
                let size = class_lower_bound(fl, sl);
                assert_eq!(
                    mapping_insert(size),
                    (fl, sl),
                    "class ({}, {}) lower bound {}",
                    fl,
                    sl,
                    size
                );
            }
        }
    }

    #[quickcheck]
    fn insert_rounds_down(size: usize) -> quickcheck::TestResult {
        let size = size % BLOCK_SIZE_MAX & !(ALIGN_SIZE - 1);
        if size < BLOCK_SIZE_MIN {
            return quickcheck::TestResult::discard();
        }

        let (fl, sl) = mapping_insert(size);
        assert!(fl < FL_INDEX_COUNT);
        assert!(sl < SL_INDEX_COUNT);

        // The block is at least as large as its class lower bound but smaller
        // than the next class up.
        let lower = class_lower_bound(fl, sl);
        assert!(lower <= size);
        let (next_fl, next_sl) = if sl + 1 < SL_INDEX_COUNT {
            (fl, sl + 1)
        } else {
            (fl + 1, 0)
        };
        if next_fl < FL_INDEX_COUNT {
            assert!(size < class_lower_bound(next_fl, next_sl));
        }

        quickcheck::TestResult::passed()
    }

    #[quickcheck]
    fn search_guarantees_fit(size: usize) -> quickcheck::TestResult {
        let size = size % BLOCK_SIZE_MAX & !(ALIGN_SIZE - 1);
        if size < BLOCK_SIZE_MIN {
            return quickcheck::TestResult::discard();
        }

        let (fl, sl) = mapping_search(size);
        if fl >= FL_INDEX_COUNT {
            // Within one second-level step of the maximum; the search path
            // reports exhaustion for these.
            return quickcheck::TestResult::discard();
        }

        // Any block filed in the class found by the search is large enough.
        assert!(
            class_lower_bound(fl, sl) >= size,
            "search({}) -> ({}, {}) admits blocks down to {}",
            size,
            fl,
            sl,
            class_lower_bound(fl, sl)
        );

        quickcheck::TestResult::passed()
    }
}
