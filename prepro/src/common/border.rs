//! Out-of-range index mapping for neighbourhood operations.

/// Mirror without repeating the edge sample: `dcb|abcd|cba`.
#[inline]
pub(crate) fn reflect_101(i: isize, len: usize) -> usize {
    debug_assert!(len > 0);
    if len == 1 {
        return 0;
    }
    let period = 2 * (len as isize - 1);
    let i = i.rem_euclid(period);
    if i >= len as isize {
        (period - i) as usize
    } else {
        i as usize
    }
}

/// Clamp to the nearest edge sample: `aaa|abcd|ddd`.
#[inline]
pub(crate) fn replicate(i: isize, len: usize) -> usize {
    debug_assert!(len > 0);
    i.clamp(0, len as isize - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflect_101_mirrors_without_edge() {
        let got: Vec<usize> = (-3..7).map(|i| reflect_101(i, 4)).collect();
        assert_eq!(got, [3, 2, 1, 0, 1, 2, 3, 2, 1, 0]);
    }

    #[test]
    fn reflect_101_handles_far_out_of_range() {
        assert_eq!(reflect_101(-10, 3), 2);
        assert_eq!(reflect_101(9, 3), 1);
        assert_eq!(reflect_101(5, 1), 0);
    }

    #[test]
    fn replicate_clamps() {
        assert_eq!(replicate(-5, 4), 0);
        assert_eq!(replicate(2, 4), 2);
        assert_eq!(replicate(10, 4), 3);
    }
}
