//! Region unlocking and leaderboards for the geography quiz.
//!
//! Both work on the attempt history alone: [`unlock`] decides which regions
//! a player may start, [`leaderboard`] reduces the history of a region to
//! one ranked entry per player.

pub mod error;
pub mod format;
pub mod leaderboard;
pub mod progress;
pub mod unlock;

pub use error::{RankingError, RankingResult};
pub use format::format_duration;
pub use leaderboard::{LeaderboardEntry, rank};
pub use progress::best_scores;
pub use unlock::{UnlockChain, UnlockRule};
