use std::collections::BTreeSet;

/// Smallest sample size that can hold both the first and last frame.
pub const MIN_SAMPLE_SIZE: usize = 2;

/// Indices into a sequence of `len` items chosen by even spacing.
///
/// Returns `0..len` when `len <= max`. Otherwise the first and last index are
/// always kept and `max - 2` interior slots are spread evenly between them.
/// Coinciding slots are merged, so the result may be shorter than `max`.
pub fn sample_indices(len: usize, max: usize) -> Vec<usize> {
    let max = max.max(MIN_SAMPLE_SIZE);
    if len <= max {
        return (0..len).collect();
    }

    let last = len - 1;
    let span = last as f64;
    let gaps = (max - 1) as f64;
    let mut picked = BTreeSet::from([0, last]);
    for slot in 1..=max - 2 {
        let idx = (slot as f64 * span / gaps).round() as usize;
        picked.insert(idx.min(last));
    }
    picked.into_iter().collect()
}

/// Reduce `frames` to at most `max` representative items in original order.
pub fn sample_frames<T: Clone>(frames: &[T], max: usize) -> Vec<T> {
    sample_indices(frames.len(), max)
        .into_iter()
        .map(|idx| frames[idx].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{sample_frames, sample_indices};

    #[test]
    fn short_input_is_returned_unchanged() {
        let frames = vec!["a", "b", "c"];
        assert_eq!(sample_frames(&frames, 3), frames);
        assert_eq!(sample_frames(&frames, 8), frames);
        assert!(sample_frames::<&str>(&[], 4).is_empty());
    }

    #[test]
    fn spreads_interior_slots_evenly() {
        assert_eq!(sample_indices(10, 4), vec![0, 3, 6, 9]);
        assert_eq!(sample_indices(100, 5), vec![0, 25, 50, 74, 99]);
        assert_eq!(sample_indices(5, 2), vec![0, 4]);
    }

    #[test]
    fn max_below_two_is_clamped() {
        assert_eq!(sample_indices(6, 0), vec![0, 5]);
        assert_eq!(sample_indices(6, 1), vec![0, 5]);
    }

    #[test]
    fn bounded_ordered_and_anchored_for_all_small_inputs() {
        for len in 0..60 {
            for max in 2..12 {
                let picked = sample_indices(len, max);
                assert!(picked.len() <= max, "len={len} max={max}");
                assert!(
                    picked.windows(2).all(|pair| pair[0] < pair[1]),
                    "len={len} max={max}"
                );
                if len > max {
                    assert_eq!(picked.first(), Some(&0), "len={len} max={max}");
                    assert_eq!(picked.last(), Some(&(len - 1)), "len={len} max={max}");
                } else {
                    assert_eq!(picked, (0..len).collect::<Vec<_>>());
                }
            }
        }
    }

    #[test]
    fn resampling_with_same_bound_is_identity() {
        let frames: Vec<u32> = (0..37).collect();
        let once = sample_frames(&frames, 6);
        assert_eq!(sample_frames(&once, 6), once);
    }
}
