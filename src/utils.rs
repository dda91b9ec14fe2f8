//! Utilities in succinct-trie.

/// Returns `ceil(log2(x))`, i.e., the number of bits needed to distinguish `x` values.
///
/// Returns `0` for `x <= 1`.
///
/// # Examples
///
/// ```
/// use succinct_trie::utils::ceil_log2;
///
/// assert_eq!(ceil_log2(0), 0);
/// assert_eq!(ceil_log2(1), 0);
/// assert_eq!(ceil_log2(2), 1);
/// assert_eq!(ceil_log2(27), 5);
/// assert_eq!(ceil_log2(32), 5);
/// assert_eq!(ceil_log2(1024), 10);
/// ```
pub const fn ceil_log2(x: usize) -> usize {
    if x <= 1 {
        0
    } else {
        (usize::BITS - (x - 1).leading_zeros()) as usize
    }
}

/// Returns `ceil(x / y)`.
///
/// # Examples
///
/// ```
/// use succinct_trie::utils::ceiled_divide;
///
/// assert_eq!(ceiled_divide(10, 2), 5);
/// assert_eq!(ceiled_divide(10, 3), 4);
/// ```
///
/// # Panics
///
/// It will panic if `y == 0`.
pub const fn ceiled_divide(x: usize, y: usize) -> usize {
    (x + y - 1) / y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil_log2_matches_float() {
        for x in 2..5000usize {
            let expected = (x as f64).log2().ceil() as usize;
            assert_eq!(ceil_log2(x), expected, "x = {x}");
        }
    }
}
