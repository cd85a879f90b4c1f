use crate::constants::{MAX_RARITY, RARITY_EXPONENT, RARITY_LAMBDA, RARITY_TIERS};
use crate::crypto::{rolling_hash, Digest};
use crate::types::{Rarity, RarityVariant};
use std::sync::OnceLock;

// Digest to rarity tier. Both mappings fold the digest with the same rolling hash and skew
// hard toward tier 1; they differ in how the folded value is spread over the tiers.

pub fn rarity_from_digest(digest: &Digest, variant: RarityVariant) -> Rarity {
    match variant {
        RarityVariant::Curve => curve_rarity(digest.as_ref()),
        RarityVariant::Table => table_rarity(digest.as_ref()),
    }
}

/// `|h| / len`, reduced to its fractional part, raised to [`RARITY_EXPONENT`] and scaled onto
/// `1..=11`.
pub fn curve_rarity(bytes: &[u8]) -> Rarity {
    curve_tier(rolling_hash(bytes), bytes.len())
}

fn curve_tier(hash: i32, len: usize) -> Rarity {
    let magnitude = (hash as i64).abs() as f64;
    let base = if len > 0 { magnitude / len as f64 } else { magnitude };
    let normalized = base.fract();
    let value = normalized.powf(RARITY_EXPONENT) * 10.0 + 1.0;
    Rarity::saturating(value.round() as i64)
}

/// `h / 2^32` sampled against the cumulative exponential table.
pub fn table_rarity(bytes: &[u8]) -> Rarity {
    table_tier(rolling_hash(bytes))
}

fn table_tier(hash: i32) -> Rarity {
    let normalized = hash as u32 as f64 / 4_294_967_296.0;
    let mut cumulative = 0.0;
    for (i, weight) in tier_weights().iter().enumerate() {
        cumulative += weight;
        if normalized < cumulative {
            return Rarity::saturating(i as i64 + 1);
        }
    }
    Rarity::saturating(MAX_RARITY as i64)
}

/// Normalized weights `e^(-λ·i)` for tiers `1..=11`.
pub fn tier_weights() -> &'static [f64; RARITY_TIERS] {
    static WEIGHTS: OnceLock<[f64; RARITY_TIERS]> = OnceLock::new();
    WEIGHTS.get_or_init(|| {
        let mut weights = [0.0; RARITY_TIERS];
        for (i, w) in weights.iter_mut().enumerate() {
            *w = (-RARITY_LAMBDA * (i + 1) as f64).exp();
        }
        let total: f64 = weights.iter().sum();
        for w in weights.iter_mut() {
            *w /= total;
        }
        weights
    })
}
