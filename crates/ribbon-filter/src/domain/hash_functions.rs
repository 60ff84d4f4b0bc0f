//! Seeded hash functions for Ribbon filter rows
//!
//! Every row is derived from four calls to one seeded 32-bit hash. The
//! default is FNV-1a over the key bytes with the seed folded into the offset
//! basis; MurmurHash3 is available as a drop-in alternative.

use std::io::Cursor;
use std::sync::Arc;

/// Pluggable seeded hash: `(key bytes, seed) -> 32-bit value`
pub type HashFn = Arc<dyn Fn(&[u8], u32) -> u32 + Send + Sync>;

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// Seeded FNV-1a, finished with the MurmurHash3 32-bit avalanche.
///
/// Without the final mix the low output bits depend only on the low bits of
/// the seed, which correlates the four row hashes.
pub fn fnv1a_hash(key: &[u8], seed: u32) -> u32 {
    let mut h = FNV_OFFSET_BASIS ^ seed;
    for &byte in key {
        h ^= u32::from(byte);
        h = h.wrapping_mul(FNV_PRIME);
    }
    fmix32(h)
}

/// MurmurHash3 (x86, 32-bit) of `key` with `seed`
pub fn murmur3_hash(key: &[u8], seed: u32) -> u32 {
    let mut cursor = Cursor::new(key);
    // Reading from an in-memory slice cannot fail
    murmur3::murmur3_32(&mut cursor, seed).unwrap_or(0)
}

/// The hash used when the caller does not configure one
pub fn default_hash_fn() -> HashFn {
    Arc::new(fnv1a_hash)
}

fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv1a_known_values() {
        assert_eq!(fnv1a_hash(b"", 0), 0xab3e_7c0b);
        assert_eq!(fnv1a_hash(b"a", 0), 0x1a80_b1b3);
        assert_eq!(fnv1a_hash(b"apple", 100), 0xac5d_6d35);
    }

    #[test]
    fn test_murmur3_reference_vectors() {
        assert_eq!(murmur3_hash(b"", 0), 0);
        assert_eq!(murmur3_hash(b"", 1), 0x514e_28b7);
        assert_eq!(murmur3_hash(b"hello", 0), 0x248b_fa47);
        assert_eq!(
            murmur3_hash(b"The quick brown fox jumps over the lazy dog", 0),
            0x2e4f_f723
        );
    }

    #[test]
    fn test_hash_deterministic() {
        let key = b"ribbon_key_0xABCD";
        assert_eq!(fnv1a_hash(key, 42), fnv1a_hash(key, 42));
        assert_eq!(murmur3_hash(key, 42), murmur3_hash(key, 42));
    }

    #[test]
    fn test_different_seed_different_output() {
        let key = b"ribbon_key_0xABCD";
        for seed in [0u32, 100, 200, 300, 400] {
            assert_ne!(
                fnv1a_hash(key, seed),
                fnv1a_hash(key, seed + 1),
                "Adjacent seeds must produce different outputs"
            );
        }
    }

    #[test]
    fn test_low_byte_uniformity() {
        // Targets are the low byte of a hash, so it must spread evenly
        let mut counts = [0usize; 16];
        for i in 0..16_000 {
            let key = format!("element_{}", i);
            let low = fnv1a_hash(key.as_bytes(), 400) & 0xFF;
            counts[(low / 16) as usize] += 1;
        }

        // 1000 expected per bucket, allow 25% variance
        for (i, count) in counts.iter().enumerate() {
            assert!(
                (750..=1250).contains(count),
                "Bucket {} has {} entries, expected ~1000",
                i,
                count
            );
        }
    }

    #[test]
    fn test_default_hash_fn_is_fnv1a() {
        let hash = default_hash_fn();
        assert_eq!(hash(b"apple", 100), fnv1a_hash(b"apple", 100));
    }
}
