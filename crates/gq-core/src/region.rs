use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::place::{Place, PlaceId};

/// A named geographic dataset, e.g. `colombia` or `suramerica`.
///
/// Each region has its own catalog and its own leaderboard partition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Region(String);

impl Region {
    /// Create a region tag.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The region tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Region {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// The places of one region, loaded once per session and read-only after.
#[derive(Debug, Clone)]
pub struct RegionCatalog {
    region: Region,
    places: Vec<Place>,
}

impl RegionCatalog {
    /// Build a catalog, rejecting repeated place identifiers.
    pub fn new(region: Region, places: Vec<Place>) -> CoreResult<Self> {
        let mut seen = HashSet::with_capacity(places.len());
        for place in &places {
            if !seen.insert(place.id) {
                return Err(CoreError::DuplicatePlace {
                    id: place.id,
                    region,
                });
            }
        }
        Ok(Self { region, places })
    }

    /// The region this catalog belongs to.
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// All places in catalog order.
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Look up a place by identifier.
    pub fn get(&self, id: PlaceId) -> Option<&Place> {
        self.places.iter().find(|p| p.id == id)
    }

    /// Every place except the one with the given identifier.
    pub fn others(&self, id: PlaceId) -> impl Iterator<Item = &Place> {
        self.places.iter().filter(move |p| p.id != id)
    }

    /// Number of places.
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Whether the catalog has no places.
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn places() -> Vec<Place> {
        vec![
            Place::new(1, "Antioquia", "Medellín"),
            Place::new(2, "Valle del Cauca", "Cali"),
            Place::new(3, "Atlántico", "Barranquilla"),
        ]
    }

    #[test]
    fn build_and_lookup() {
        let catalog = RegionCatalog::new(Region::new("colombia"), places()).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.region().as_str(), "colombia");
        assert_eq!(catalog.get(PlaceId(2)).unwrap().capital, "Cali");
        assert!(catalog.get(PlaceId(9)).is_none());
    }

    #[test]
    fn others_excludes_by_id() {
        let catalog = RegionCatalog::new(Region::new("colombia"), places()).unwrap();
        let ids: Vec<PlaceId> = catalog.others(PlaceId(1)).map(|p| p.id).collect();
        assert_eq!(ids, vec![PlaceId(2), PlaceId(3)]);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let mut list = places();
        list.push(Place::new(1, "Copy", "Copy"));
        let result = RegionCatalog::new(Region::new("colombia"), list);
        assert!(matches!(result, Err(CoreError::DuplicatePlace { id: PlaceId(1), .. })));
    }

    #[test]
    fn region_serde_is_a_plain_string() {
        let json = serde_json::to_string(&Region::new("suramerica")).unwrap();
        assert_eq!(json, "\"suramerica\"");
    }
}
