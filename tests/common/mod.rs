use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use std::collections::HashSet;

/// Seed shared by the integration tests so failures reproduce.
pub const SEED: u64 = 0x5eed;

pub fn rng() -> StdRng {
    StdRng::seed_from_u64(SEED)
}

/// Generate `count` distinct path-shaped keys with heavy prefix sharing,
/// the access pattern radix trees are built for.
pub fn segmented_keys(rng: &mut StdRng, count: usize) -> Vec<String> {
    const HEADS: &[&str] = &["alpha", "beta", "gamma", "delta"];
    const MIDS: &[&str] = &["red", "green", "blue"];

    let mut seen = HashSet::new();
    let mut keys = Vec::with_capacity(count);
    while keys.len() < count {
        let key = format!(
            "{}/{}/{:04}",
            HEADS[rng.gen_range(0..HEADS.len())],
            MIDS[rng.gen_range(0..MIDS.len())],
            rng.gen_range(0..10_000u32),
        );
        if seen.insert(key.clone()) {
            keys.push(key);
        }
    }
    keys
}

/// The same key set in a different insertion order.
pub fn shuffled(rng: &mut StdRng, keys: &[String]) -> Vec<String> {
    let mut out = keys.to_vec();
    out.shuffle(rng);
    out
}
