//! JSON files on disk as the place catalog and attempt history.
//!
//! `places.json` maps region names to their places. `history.json` is an
//! array of attempt records, appended to after every session.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use gq_core::{AttemptRecord, AttemptSink, CatalogSource, CoreError, CoreResult, HistorySource};
use gq_core::{Place, Region};

pub const PLACES_FILE: &str = "places.json";
pub const HISTORY_FILE: &str = "history.json";

pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    fn places_path(&self) -> PathBuf {
        self.dir.join(PLACES_FILE)
    }

    fn history_path(&self) -> PathBuf {
        self.dir.join(HISTORY_FILE)
    }

    fn read_places(&self) -> CoreResult<HashMap<Region, Vec<Place>>> {
        let path = self.places_path();
        let content = fs::read_to_string(&path)
            .map_err(|e| CoreError::Storage(format!("cannot read {}: {e}", path.display())))?;
        serde_json::from_str(&content)
            .map_err(|e| CoreError::Storage(format!("invalid {}: {e}", path.display())))
    }

    fn read_history(&self) -> CoreResult<Vec<AttemptRecord>> {
        let path = self.history_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(CoreError::Storage(format!(
                    "cannot read {}: {e}",
                    path.display()
                )));
            }
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content)
            .map_err(|e| CoreError::Storage(format!("invalid {}: {e}", path.display())))
    }
}

impl CatalogSource for JsonStore {
    fn fetch_places(&self, region: &Region) -> CoreResult<Vec<Place>> {
        let mut places = self.read_places()?;
        Ok(places.remove(region).unwrap_or_default())
    }
}

impl AttemptSink for JsonStore {
    fn record_attempt(&mut self, record: &AttemptRecord) -> CoreResult<()> {
        let mut history = self
            .read_history()
            .map_err(|e| CoreError::Persistence(e.to_string()))?;
        history.push(record.clone());

        let json = serde_json::to_string_pretty(&history)
            .map_err(|e| CoreError::Persistence(e.to_string()))?;
        let path = self.history_path();
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json + "\n")
            .and_then(|()| fs::rename(&tmp, &path))
            .map_err(|e| CoreError::Persistence(format!("cannot write {}: {e}", path.display())))
    }
}

impl HistorySource for JsonStore {
    fn fetch_history(&self, region: &Region) -> CoreResult<Vec<AttemptRecord>> {
        let mut history = self.read_history()?;
        history.retain(|r| &r.region == region);
        Ok(history)
    }

    fn fetch_all_history(&self) -> CoreResult<Vec<AttemptRecord>> {
        self.read_history()
    }
}
