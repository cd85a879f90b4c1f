use crate::catalog::name_from_digest;
use crate::crypto::{derive_digest, Digest};
use crate::palette::color_from_digest;
use crate::rarity::rarity_from_digest;
use crate::rng::rainbow_color;
use crate::types::{Face, FaceRules};
use rand::RngCore;

// Scan payload to face. Name, colour and rarity are independent projections of one digest;
// only a rare roll swaps the colour for a random rainbow hue.

/// The deterministic face for a digest, before any rare-colour substitution.
pub fn identity_from_digest(digest: &Digest, rules: &FaceRules) -> Face {
    Face {
        name: name_from_digest(digest).to_string(),
        color: color_from_digest(digest),
        rarity: rarity_from_digest(digest, rules.variant),
    }
}

pub fn derive_face<R: RngCore + ?Sized>(payload: &str, rules: &FaceRules, rng: &mut R) -> Face {
    let digest = derive_digest(payload);
    let mut face = identity_from_digest(&digest, rules);
    if rules.threshold.is_rare(face.rarity) {
        face.color = rainbow_color(rng);
    }
    log::debug!("{} -> {}", digest, face);
    face
}
