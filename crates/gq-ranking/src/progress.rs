//! Per-player best scores, the input of the unlock chain.

use std::collections::HashMap;

use gq_core::{AttemptRecord, Region};

/// The best score `player_id` has recorded in each region.
pub fn best_scores(records: &[AttemptRecord], player_id: &str) -> HashMap<Region, u32> {
    let mut best: HashMap<Region, u32> = HashMap::new();
    for record in records.iter().filter(|r| r.player_id == player_id) {
        let entry = best.entry(record.region.clone()).or_insert(record.score);
        *entry = (*entry).max(record.score);
    }
    best
}
