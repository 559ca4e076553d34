//! BLAKE3 helpers for deterministic seeding.
//!
//! The stub encoder derives one pseudo-random direction per token from these
//! seeds, so the same token always maps to the same vector across processes.

use blake3::Hasher;

/// Domain separator mixed into token seeds.
const TOKEN_SEED_DOMAIN: &[u8] = b"skillswap.stub-token";

/// Computes a 64-bit hash of the input data using BLAKE3, truncated from 256 bits.
///
/// Collisions only merge two token directions in the stub encoder, they never
/// corrupt data, so 64 bits are plenty.
#[inline]
pub fn hash_to_u64(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let bytes: [u8; 8] = hash.as_bytes()[0..8]
        .try_into()
        .expect("BLAKE3 always produces at least 8 bytes");
    u64::from_le_bytes(bytes)
}

/// Seed for a single token of stub-encoded text.
#[inline]
pub fn hash_token(token: &str) -> u64 {
    let mut hasher = Hasher::new();
    hasher.update(TOKEN_SEED_DOMAIN);
    hasher.update(b"|");
    hasher.update(token.as_bytes());

    let hash = hasher.finalize();
    let bytes: [u8; 8] = hash.as_bytes()[0..8]
        .try_into()
        .expect("BLAKE3 always produces at least 8 bytes");
    u64::from_le_bytes(bytes)
}
