use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use gq_core::IdentityProvider;
use gq_ranking::UnlockChain;

use crate::store::JsonStore;

pub fn run(store: &JsonStore, identity: &impl IdentityProvider) -> Result<(), String> {
    let player = identity.current_player();
    let best = super::player_best_scores(store, player.as_ref())?;
    let chain = UnlockChain::default();

    match &player {
        Some(p) => println!("  Regions for {}", p.display_label().bold()),
        None => println!("  Regions for {} (pass --player to track progress)", "guest".bold()),
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Region", "Status", "Best", "Unlock"]);

    for region in chain.regions() {
        let status = if chain.is_unlocked(region, &best) {
            "open"
        } else {
            "locked"
        };
        let best_score = best
            .get(region)
            .map_or_else(|| "--".to_string(), ToString::to_string);
        table.add_row(vec![
            region.to_string(),
            status.to_string(),
            best_score,
            super::requirement(&chain, region),
        ]);
    }

    println!("{table}");
    Ok(())
}
