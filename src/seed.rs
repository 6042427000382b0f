//! Seeded pseudo-randomness via string hashing.
//!
//! Every "random" draw in this crate is a pure function of a seed string, so
//! identical inputs always reproduce identical tiles. Do not replace this
//! with a stateful PRNG: callers cache generated batches and re-render from
//! the same seeds across a session.

use sha2::{Digest, Sha256};

/// Map a seed string to a value in [0, 1).
///
/// sha256 of the seed, first 8 bytes as a big-endian u64, scaled by 2^-64.
pub fn unit(seed: &str) -> f64 {
    let hash = Sha256::digest(seed.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash[..8]);
    let n = u64::from_be_bytes(bytes);
    n as f64 / (u64::MAX as f64 + 1.0)
}

/// Draw `n` values from `seed` by suffixing `-0`, `-1`, ... `-(n-1)`.
pub fn unit_seq(seed: &str, n: usize) -> Vec<f64> {
    (0..n).map(|i| unit(&format!("{}-{}", seed, i))).collect()
}

/// Pick one element of `items`, keyed by `seed`.
///
/// Callers only hand in non-empty static tables.
pub fn pick<'a, T>(seed: &str, items: &'a [T]) -> &'a T {
    let idx = index(seed, items.len());
    &items[idx]
}

/// Seeded index into a table of `len` entries, clamped to the last slot.
pub fn index(seed: &str, len: usize) -> usize {
    index_from(unit(seed), len)
}

/// Index a table from an already-drawn unit value.
pub fn index_from(value: f64, len: usize) -> usize {
    debug_assert!(len > 0);
    let idx = (value * len as f64) as usize;
    idx.min(len.saturating_sub(1))
}

/// Short hex digest of joined parts, for state correlation in logs.
pub fn digest(parts: &[&str]) -> String {
    let joined = parts.join("|");
    let hash = Sha256::digest(joined.as_bytes());
    hex::encode(&hash[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_is_deterministic() {
        assert_eq!(unit("revenue-2-Detailed"), unit("revenue-2-Detailed"));
        assert_eq!(unit(""), unit(""));
    }

    #[test]
    fn unit_stays_in_range() {
        for seed in ["a", "b", "revenue", "root-revenue-1", "x-term-3"] {
            let v = unit(seed);
            assert!((0.0..1.0).contains(&v), "{} -> {}", seed, v);
        }
    }

    #[test]
    fn unit_distinguishes_seeds() {
        assert_ne!(unit("seed-a"), unit("seed-b"));
        assert_ne!(unit("seed-0"), unit("seed-00"));
    }

    // Pinned values so the hash shape can never silently change. Generated
    // batches are cached by seed; changing this function invalidates every
    // cached exploration session.
    #[test]
    fn unit_shape_is_pinned() {
        assert_eq!(unit("root-revenue-1").to_bits(), 0x3fe86bcf6f5b78f3);
        assert_eq!(unit("revenue-sales-0-term-2").to_bits(), 0x3fedaa202cc113d5);
        assert_eq!(unit("layer-3-custom-query").to_bits(), 0x3fe4ffa83e1cd886);
        assert_eq!(unit("root-revenue-1"), 0.7631604361484093);
    }

    #[test]
    fn unit_seq_matches_suffixed_unit() {
        let seq = unit_seq("s", 3);
        assert_eq!(seq[0], unit("s-0"));
        assert_eq!(seq[1], unit("s-1"));
        assert_eq!(seq[2], unit("s-2"));
    }

    #[test]
    fn pick_is_stable_and_in_table() {
        let table = ["a", "b", "c", "d"];
        let first = *pick("seed", &table);
        assert_eq!(first, *pick("seed", &table));
        assert!(table.contains(&first));
    }

    #[test]
    fn digest_is_short_hex() {
        let d = digest(&["revenue", "layer-1"]);
        assert_eq!(d.len(), 16);
        assert_eq!(d, digest(&["revenue", "layer-1"]));
        assert_ne!(d, digest(&["revenue", "layer-2"]));
    }
}
