use thiserror::Error;

use crate::store::StoreError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Camera error: {0}")]
    Camera(String),
    #[error("Rarity {0} is outside 1..=11")]
    InvalidRarity(u8),
}
