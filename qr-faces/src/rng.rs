use crate::constants::RAINBOW_HUES;
use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

// Randomness for rare faces. The derivation itself is deterministic; the only draw is the
// rainbow hue, and it comes from whatever generator the caller injects.

/// A random fully saturated colour, `hsl(H, 100%, 50%)` with `H` in `0..360`.
pub fn rainbow_color<R: RngCore + ?Sized>(rng: &mut R) -> String {
    let hue = rng.gen_range(0..RAINBOW_HUES);
    format!("hsl({}, 100%, 50%)", hue)
}

/// Generator for interactive use: seeded when a seed is given, from OS entropy otherwise.
pub fn session_rng(seed: Option<u64>) -> Pcg64Mcg {
    match seed {
        Some(seed) => Pcg64Mcg::seed_from_u64(seed),
        None => Pcg64Mcg::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hue_of(color: &str) -> u16 {
        color
            .strip_prefix("hsl(")
            .and_then(|rest| rest.split(',').next())
            .and_then(|h| h.trim().parse().ok())
            .unwrap()
    }

    #[test]
    fn rainbow_is_full_saturation_hsl() {
        let mut rng = Pcg64Mcg::seed_from_u64(7);
        for _ in 0..200 {
            let color = rainbow_color(&mut rng);
            assert!(color.ends_with(", 100%, 50%)"), "{}", color);
            assert!(hue_of(&color) < 360);
        }
    }

    #[test]
    fn seeded_rng_repeats() {
        let a: Vec<_> = (0..5).map({
            let mut rng = session_rng(Some(3));
            move |_| rainbow_color(&mut rng)
        }).collect();
        let b: Vec<_> = (0..5).map({
            let mut rng = session_rng(Some(3));
            move |_| rainbow_color(&mut rng)
        }).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn seeded_session_matches_plain_seeding() {
        let mut session = session_rng(Some(42));
        let mut plain = Pcg64Mcg::seed_from_u64(42);
        assert_eq!(session.next_u64(), plain.next_u64());
    }

    #[test]
    fn hues_spread_over_the_wheel() {
        let mut rng = Pcg64Mcg::seed_from_u64(11);
        let hues: Vec<u16> = (0..1000).map(|_| hue_of(&rainbow_color(&mut rng))).collect();
        assert!(hues.iter().any(|&h| h < 90));
        assert!(hues.iter().any(|&h| h >= 270));
    }
}
