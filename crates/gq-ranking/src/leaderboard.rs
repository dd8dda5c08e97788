//! Leaderboard aggregation.
//!
//! The history of a region is reduced to each player's best attempt, then
//! ordered by score (descending) and elapsed time (ascending). A missing or
//! zero time always loses a tie against a recorded one.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gq_core::{AttemptRecord, Region};

/// A player's best attempt in a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based rank.
    pub position: usize,
    /// Player identifier.
    pub player_id: String,
    /// Display label.
    pub label: String,
    /// Best score.
    pub score: u32,
    /// Rounds in that attempt.
    pub total_questions: u32,
    /// Elapsed seconds of that attempt, if recorded.
    pub total_time_secs: Option<u32>,
    /// When that attempt finished.
    pub recorded_at: DateTime<Utc>,
}

/// Rank the attempts of `region`, one entry per player, best first.
pub fn rank(records: &[AttemptRecord], region: &Region) -> Vec<LeaderboardEntry> {
    let mut order: Vec<&str> = Vec::new();
    let mut best: HashMap<&str, &AttemptRecord> = HashMap::new();

    for record in records.iter().filter(|r| &r.region == region) {
        let player = record.player_id.as_str();
        let replace = match best.get(player) {
            Some(incumbent) => beats(record, incumbent),
            None => {
                order.push(player);
                true
            }
        };
        if replace {
            best.insert(player, record);
        }
    }

    let mut winners: Vec<&AttemptRecord> =
        order.iter().filter_map(|p| best.get(p).copied()).collect();
    winners.sort_by(|a, b| compare(a, b));

    winners
        .into_iter()
        .enumerate()
        .map(|(i, record)| LeaderboardEntry {
            position: i + 1,
            player_id: record.player_id.clone(),
            label: record.display_label().to_string(),
            score: record.score,
            total_questions: record.total_questions,
            total_time_secs: record.reliable_time(),
            recorded_at: record.recorded_at,
        })
        .collect()
}

/// Whether `challenger` replaces `incumbent` as a player's best.
fn beats(challenger: &AttemptRecord, incumbent: &AttemptRecord) -> bool {
    compare(challenger, incumbent) == Ordering::Less
}

/// Leaderboard order: higher score first, then faster time, missing last.
fn compare(a: &AttemptRecord, b: &AttemptRecord) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| match (a.reliable_time(), b.reliable_time()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}
