use crate::constants::{DEFAULT_RARE_ABOVE, MAX_RARITY, MIN_RARITY};
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

// Shared data types for derived faces and the collection. Kept lean so the session owns
// the mutation logic elsewhere.

/// Rarity tier in `1..=11`. Low tiers are common.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rarity(u8);

impl Rarity {
    pub const COMMON: Rarity = Rarity(MIN_RARITY);
    pub const LEGENDARY: Rarity = Rarity(MAX_RARITY);

    pub fn new(value: u8) -> Result<Self, Error> {
        if (MIN_RARITY..=MAX_RARITY).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidRarity(value))
        }
    }

    /// Clamps any integer into the valid tier range.
    pub fn saturating(value: i64) -> Self {
        Self(value.clamp(MIN_RARITY as i64, MAX_RARITY as i64) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rarity {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rarity::new(value)
    }
}

impl From<Rarity> for u8 {
    fn from(rarity: Rarity) -> Self {
        rarity.0
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Face {
    pub name: String,
    pub color: String,
    pub rarity: Rarity,
}

impl Face {
    pub fn new(name: impl Into<String>, color: impl Into<String>, rarity: Rarity) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            rarity,
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.name, self.rarity, self.color)
    }
}

/// Ordered, append-only list of saved faces. Duplicates are allowed.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct Collection {
    faces: Vec<Face>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, face: Face) {
        self.faces.push(face);
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Face> {
        if index < self.faces.len() {
            Some(self.faces.remove(index))
        } else {
            None
        }
    }

    /// Removes the first entry equal to `face`. Absent faces leave the collection as is.
    pub fn remove(&mut self, face: &Face) -> Option<Face> {
        let index = self.faces.iter().position(|f| f == face)?;
        self.remove_at(index)
    }

    pub fn clear(&mut self) {
        self.faces.clear();
    }

    pub fn get(&self, index: usize) -> Option<&Face> {
        self.faces.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Face> {
        self.faces.iter()
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

impl From<Vec<Face>> for Collection {
    fn from(faces: Vec<Face>) -> Self {
        Self { faces }
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Face;
    type IntoIter = std::slice::Iter<'a, Face>;

    fn into_iter(self) -> Self::IntoIter {
        self.faces.iter()
    }
}

/// Which digest-to-rarity mapping to use.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RarityVariant {
    /// Rolling hash, fractional part of `|h| / len`, raised to a fixed exponent.
    #[default]
    Curve,
    /// Rolling hash over `2^32`, sampled against an exponential tier table.
    Table,
}

/// Threshold above which a face is considered rare and shown in a rainbow colour.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RareThreshold {
    Above(u8),
    AtLeast(u8),
}

impl Default for RareThreshold {
    fn default() -> Self {
        RareThreshold::Above(DEFAULT_RARE_ABOVE)
    }
}

impl RareThreshold {
    pub fn is_rare(&self, rarity: Rarity) -> bool {
        match *self {
            RareThreshold::Above(t) => rarity.get() > t,
            RareThreshold::AtLeast(t) => rarity.get() >= t,
        }
    }
}

/// The knobs of the derivation pipeline.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct FaceRules {
    pub variant: RarityVariant,
    pub threshold: RareThreshold,
}
