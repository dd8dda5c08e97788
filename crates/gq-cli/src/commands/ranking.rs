use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use gq_core::{HistorySource, Region};
use gq_ranking::{UnlockChain, format_duration, rank};

use crate::store::JsonStore;

pub fn run(store: &JsonStore, region: Option<&str>) -> Result<(), String> {
    let regions: Vec<Region> = match region {
        Some(name) => vec![Region::new(name)],
        None => UnlockChain::default().regions().into_iter().cloned().collect(),
    };

    for (i, region) in regions.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let history = store.fetch_history(region).map_err(|e| e.to_string())?;
        let entries = rank(&history, region);

        println!("  {}", region.to_string().bold());
        if entries.is_empty() {
            println!("  No attempts yet.");
            continue;
        }

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["#", "Player", "Score", "Time"]);
        for entry in &entries {
            table.add_row(vec![
                entry.position.to_string(),
                entry.label.clone(),
                format!("{}/{}", entry.score, entry.total_questions),
                format_duration(entry.total_time_secs),
            ]);
        }
        println!("{table}");
    }

    Ok(())
}
