//! Even split of a lamport total across recipients.

/// Divides `total` lamports across `count` recipients with no leftover.
///
/// Every recipient gets `total / count`, and the first `total % count`
/// recipients in list order get one extra lamport. Returns an empty vector
/// when `count` is zero.
#[must_use]
pub fn allocate_even_split(total: u64, count: usize) -> Vec<u64> {
    let Ok(divisor) = u64::try_from(count) else {
        return Vec::new();
    };
    if divisor == 0 {
        return Vec::new();
    }

    let per = total / divisor;
    let remainder = total % divisor;

    (0..divisor)
        .map(|i| if i < remainder { per + 1 } else { per })
        .collect()
}
