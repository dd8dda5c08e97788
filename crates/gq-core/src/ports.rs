use std::collections::HashMap;

use crate::attempt::AttemptRecord;
use crate::error::{CoreError, CoreResult};
use crate::place::Place;
use crate::player::Player;
use crate::region::{Region, RegionCatalog};

/// Supplies the place catalog for a region.
pub trait CatalogSource {
    /// Fetch every place of a region. An unknown region yields an empty list.
    fn fetch_places(&self, region: &Region) -> CoreResult<Vec<Place>>;

    /// Fetch and validate a catalog, treating an empty one as unavailable.
    fn load_catalog(&self, region: &Region) -> CoreResult<RegionCatalog> {
        let places = self.fetch_places(region)?;
        if places.is_empty() {
            return Err(CoreError::DataUnavailable {
                region: region.clone(),
            });
        }
        RegionCatalog::new(region.clone(), places)
    }
}

/// Receives the record of every completed session.
pub trait AttemptSink {
    /// Append one record.
    fn record_attempt(&mut self, record: &AttemptRecord) -> CoreResult<()>;
}

/// Reads back recorded attempts.
pub trait HistorySource {
    /// All attempts recorded for a region, in insertion order.
    fn fetch_history(&self, region: &Region) -> CoreResult<Vec<AttemptRecord>>;

    /// All attempts of every region.
    fn fetch_all_history(&self) -> CoreResult<Vec<AttemptRecord>>;
}

/// Supplies the identity of whoever is playing.
pub trait IdentityProvider {
    /// The current player, if one is signed in.
    fn current_player(&self) -> Option<Player>;
}

impl<T: AttemptSink + ?Sized> AttemptSink for &mut T {
    fn record_attempt(&mut self, record: &AttemptRecord) -> CoreResult<()> {
        (**self).record_attempt(record)
    }
}

impl IdentityProvider for Player {
    fn current_player(&self) -> Option<Player> {
        Some(self.clone())
    }
}

/// An in-process store holding catalogs and history in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    catalogs: HashMap<Region, Vec<Place>>,
    history: Vec<AttemptRecord>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the places of a region.
    pub fn with_places(mut self, region: Region, places: Vec<Place>) -> Self {
        self.catalogs.insert(region, places);
        self
    }

    /// Every stored record, in insertion order.
    pub fn records(&self) -> &[AttemptRecord] {
        &self.history
    }
}

impl CatalogSource for MemoryStore {
    fn fetch_places(&self, region: &Region) -> CoreResult<Vec<Place>> {
        Ok(self.catalogs.get(region).cloned().unwrap_or_default())
    }
}

impl AttemptSink for MemoryStore {
    fn record_attempt(&mut self, record: &AttemptRecord) -> CoreResult<()> {
        self.history.push(record.clone());
        Ok(())
    }
}

impl HistorySource for MemoryStore {
    fn fetch_history(&self, region: &Region) -> CoreResult<Vec<AttemptRecord>> {
        Ok(self
            .history
            .iter()
            .filter(|r| &r.region == region)
            .cloned()
            .collect())
    }

    fn fetch_all_history(&self) -> CoreResult<Vec<AttemptRecord>> {
        Ok(self.history.clone())
    }
}
