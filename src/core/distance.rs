//! Length-tolerant Hamming distance between bit sequences

/// Mismatches over the shared prefix plus the length difference.
///
/// Equal lengths reduce to plain Hamming distance. Every extra or missing
/// bit costs 1, so `distance(a, b) >= |len(a) - len(b)|`.
pub fn distance(a: &[u8], b: &[u8]) -> usize {
    let mismatches = a.iter().zip(b.iter()).filter(|(x, y)| x != y).count();
    mismatches + a.len().abs_diff(b.len())
}

// =============================================================================
// TESTS
// =============================================================================
