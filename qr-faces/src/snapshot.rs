use crate::palette::FaceStyle;
use crate::types::{Collection, Face};
use serde::{Deserialize, Serialize};

// Lightweight container for UI sync. Carries the collection with render hints, the found
// face, the capture state, and any message the user should see.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct GameSnapshot {
    pub collection: Collection,
    pub styles: Vec<FaceStyle>,
    pub found: Option<Face>,
    pub capture_on: bool,
    pub errors: Vec<String>,
}

impl GameSnapshot {
    pub fn compose(
        collection: &Collection,
        found: Option<&Face>,
        capture_on: bool,
        errors: &[String],
    ) -> Self {
        Self {
            styles: collection
                .iter()
                .map(|face| FaceStyle::for_color(&face.color))
                .collect(),
            collection: collection.clone(),
            found: found.cloned(),
            capture_on,
            errors: errors.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rarity;

    #[test]
    fn styles_line_up_with_collection() {
        let collection = Collection::from(vec![
            Face::new("Pip", "#ffffff", Rarity::COMMON),
            Face::new("Zuzu", "#000000", Rarity::LEGENDARY),
        ]);
        let snap = GameSnapshot::compose(&collection, None, false, &[]);
        assert_eq!(snap.styles.len(), 2);
        assert_eq!(snap.styles[0].fill, "#ffffff");
        assert_eq!(snap.styles[1].border, crate::constants::LIGHT_BORDER);
    }

    #[test]
    fn serializes_for_ui() {
        let snap = GameSnapshot::compose(&Collection::new(), None, true, &["x".to_string()]);
        let value = serde_json::to_value(&snap).unwrap();
        assert_eq!(value["capture_on"], true);
        assert_eq!(value["collection"], serde_json::json!([]));
        assert_eq!(value["errors"][0], "x");
    }
}
