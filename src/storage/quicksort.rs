//! In-place quicksort used to order snapshots.
//!
//! The partition scheme takes the last element of the active range as pivot,
//! scans left to right swapping every element that compares less than the
//! pivot into a growing prefix, and finally swaps the pivot between that prefix
//! and the remainder. The sort is unstable.
//!
//! Ranges are kept on an explicit stack instead of the call stack. The larger
//! partition is deferred and the smaller one is processed first, so at most
//! `log2(n)` ranges are pending at any time. Running time remains quadratic on
//! inputs that defeat a last-element pivot (for example, already sorted data).

use std::cmp::Ordering;

use smallvec::SmallVec;

/// Pending ranges kept inline before spilling to the heap. 64 covers any
/// slice whose length fits in a `usize`.
const INLINE_RANGES: usize = 64;

/// Sorts `elements` in place using `compare`.
///
/// # Examples
///
/// ```rust
/// use slotset::storage::quicksort_by;
///
/// let mut values = vec![5, 3, 9, 1, 3];
/// quicksort_by(&mut values, |left, right| left.cmp(right));
/// assert_eq!(values, vec![1, 3, 3, 5, 9]);
/// ```
pub fn quicksort_by<T, F>(elements: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut pending: SmallVec<[(usize, usize); INLINE_RANGES]> = SmallVec::new();
    pending.push((0, elements.len()));

    while let Some((mut low, mut high)) = pending.pop() {
        while high - low > 1 {
            let pivot = partition(&mut elements[low..high], &mut compare) + low;
            if pivot - low < high - (pivot + 1) {
                pending.push((pivot + 1, high));
                high = pivot;
            } else {
                pending.push((low, pivot));
                low = pivot + 1;
            }
        }
    }
}

/// Partitions `range` around its last element and returns the pivot's final
/// index. `range` must not be empty.
fn partition<T, F>(range: &mut [T], compare: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let pivot = range.len() - 1;
    let mut boundary = 0;
    for index in 0..pivot {
        if compare(&range[index], &range[pivot]) == Ordering::Less {
            range.swap(index, boundary);
            boundary += 1;
        }
    }
    range.swap(boundary, pivot);
    boundary
}
