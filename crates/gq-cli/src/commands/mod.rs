pub mod play;
pub mod ranking;
pub mod regions;

use std::collections::HashMap;

use gq_core::{HistorySource, Player, Region};
use gq_ranking::{UnlockChain, best_scores};

/// Best scores of `player` in every region, empty for a guest.
fn player_best_scores(
    history: &impl HistorySource,
    player: Option<&Player>,
) -> Result<HashMap<Region, u32>, String> {
    let Some(player) = player else {
        return Ok(HashMap::new());
    };
    let records = history.fetch_all_history().map_err(|e| e.to_string())?;
    Ok(best_scores(&records, &player.id))
}

/// Human-readable unlock requirement for a region.
fn requirement(chain: &UnlockChain, region: &Region) -> String {
    match chain.rule_for(region) {
        Some(rule) => format!("{}+ on {}", rule.threshold, rule.prerequisite),
        None if region == chain.base() => "always open".to_string(),
        None => "not in the unlock chain".to_string(),
    }
}
