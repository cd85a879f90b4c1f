//! Point a camera at a QR code, get a face. Each code's content is hashed, and the digest
//! picks a name, a colour and a rarity tier; faces can be saved into a persisted collection.

pub mod actions;
pub mod capture;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod crypto;
pub mod error;
pub mod face;
pub mod game;
pub mod palette;
pub mod rarity;
pub mod rng;
pub mod snapshot;
pub mod store;
pub mod throttle;
pub mod types;

pub use actions::UserAction;
pub use capture::{
    CaptureLoop, CaptureSwitch, Frame, FramePoll, FrameSource, FrameTicker, IntervalTicker,
    LineSource, QrDecoder, RawTextDecoder, ScanStats,
};
pub use catalog::name_from_digest;
pub use config::GameConfig;
pub use crypto::{derive_digest, Digest};
pub use error::{Error, Result};
pub use face::{derive_face, identity_from_digest};
pub use game::{Confirm, FaceCollector};
pub use palette::{color_from_digest, FaceStyle};
pub use rarity::rarity_from_digest;
pub use rng::rainbow_color;
pub use snapshot::GameSnapshot;
pub use store::{CollectionStore, FsBackend, MemoryBackend, StorageBackend, StoreError};
pub use types::{Collection, Face, FaceRules, Rarity, RareThreshold, RarityVariant};

/// Threshold predicate for rare faces.
pub fn is_rare(rarity: Rarity, threshold: RareThreshold) -> bool {
    threshold.is_rare(rarity)
}
