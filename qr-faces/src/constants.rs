// Tuning constants for face derivation and the collection. Kept in one place so the
// derivation pipeline, the session, and the CLI agree on them.
pub const GAME_NAME: &str = "QR Code game";
pub const COLLECTION_KEY: &str = "collection";
pub const CONFIG_FILE: &str = "config.json";

pub const DIGEST_LEN: usize = 32;
pub const MIN_RARITY: u8 = 1;
pub const MAX_RARITY: u8 = 11;
pub const RARITY_TIERS: usize = 11;
pub const RARITY_EXPONENT: f64 = 2.5;
pub const RARITY_LAMBDA: f64 = 1.5;
pub const DEFAULT_RARE_ABOVE: u8 = 5;

pub const RAINBOW_HUES: u16 = 360;
pub const CONTRAST_SHIFT: f64 = 55.0;
pub const DARK_LUMINANCE: f64 = 0.05;
pub const LIGHT_BORDER: &str = "rgba(255, 255, 255, 0.9)";
pub const DARK_BORDER: &str = "rgba(0, 0, 0, 0.9)";

pub const THROTTLE_MS: u64 = 500;
pub const FRAME_INTERVAL_MS: u64 = 16;

pub const CAMERA_ERROR: &str =
    "Error accessing the camera. Please ensure that camera access permissions are granted.";
pub const RESET_PROMPT: &str = "Are you sure you want to reset your collection?";
pub const REMOVE_PROMPT: &str = "Are you sure you want to remove this face?";
