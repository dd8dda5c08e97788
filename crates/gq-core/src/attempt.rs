use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::player::{Player, display_label};
use crate::region::Region;

/// One completed session, as handed to persistence. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// Unique identifier of this attempt.
    pub id: Uuid,
    /// Identifier of the player who played.
    pub player_id: String,
    /// Display label at the time of play.
    #[serde(default)]
    pub player_label: String,
    /// Region (game mode) the session was played in.
    pub region: Region,
    /// Correct answers.
    pub score: u32,
    /// Number of rounds in the session.
    pub total_questions: u32,
    /// Total seconds spent answering. Older records may lack it.
    #[serde(default)]
    pub total_time_secs: Option<u32>,
    /// When the session finished.
    pub recorded_at: DateTime<Utc>,
}

impl AttemptRecord {
    /// Create a record stamped with the current time.
    pub fn new(
        player: &Player,
        region: Region,
        score: u32,
        total_questions: u32,
        total_time_secs: Option<u32>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            player_id: player.id.clone(),
            player_label: player.label.clone(),
            region,
            score,
            total_questions,
            total_time_secs,
            recorded_at: Utc::now(),
        }
    }

    /// Set the timestamp.
    pub fn at(mut self, recorded_at: DateTime<Utc>) -> Self {
        self.recorded_at = recorded_at;
        self
    }

    /// The elapsed time if present and non-zero.
    ///
    /// Zero is what a store writes when the column was never filled, so it
    /// counts as missing.
    pub fn reliable_time(&self) -> Option<u32> {
        self.total_time_secs.filter(|t| *t > 0)
    }

    /// The label to show for this record's player.
    pub fn display_label(&self) -> &str {
        display_label(&self.player_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_copies_player() {
        let player = Player::new("lucia@example.com");
        let rec = AttemptRecord::new(&player, Region::new("colombia"), 12, 15, Some(140));
        assert_eq!(rec.player_id, "lucia@example.com");
        assert_eq!(rec.display_label(), "lucia");
        assert_eq!(rec.reliable_time(), Some(140));
    }

    #[test]
    fn zero_time_is_unreliable() {
        let player = Player::new("a");
        let rec = AttemptRecord::new(&player, Region::new("colombia"), 1, 15, Some(0));
        assert_eq!(rec.reliable_time(), None);
        let rec = AttemptRecord::new(&player, Region::new("colombia"), 1, 15, None);
        assert_eq!(rec.reliable_time(), None);
    }

    #[test]
    fn legacy_record_without_time_deserializes() {
        let json = r#"{
            "id": "6f1c1a3e-2b9a-4c41-9d59-8c2f3a1d0b11",
            "player_id": "old@example.com",
            "region": "colombia",
            "score": 9,
            "total_questions": 15,
            "recorded_at": "2025-03-01T12:00:00Z"
        }"#;
        let rec: AttemptRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.total_time_secs, None);
        assert_eq!(rec.display_label(), "Anonymous");
    }
}
