//! Configuration for a quiz session.

use crate::persist::RetryPolicy;

/// Configuration for a quiz session.
#[derive(Debug, Clone)]
pub struct QuizConfig {
    /// RNG seed for reproducible sessions. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Rounds per session (N).
    pub question_count: usize,
    /// First 0-based position that plays in the expert (free-text) tier.
    pub expert_threshold: usize,
    /// Seconds per multiple-choice round.
    pub standard_time_secs: u32,
    /// Seconds per expert round.
    pub expert_time_secs: u32,
    /// Options shown in a multiple-choice round, correct answer included.
    pub choice_count: usize,
    /// Fact shown when a place has none of its own.
    pub fallback_fact: String,
    /// How completed sessions are delivered to persistence.
    pub retry: RetryPolicy,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            seed: None,
            question_count: 15,
            expert_threshold: 10,
            standard_time_secs: 15,
            expert_time_secs: 30,
            choice_count: 4,
            fallback_fact: "Every region has a story worth discovering!".to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

impl QuizConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the number of rounds (at least 1).
    pub fn with_question_count(mut self, count: usize) -> Self {
        self.question_count = count.max(1);
        self
    }

    /// Set the position where the expert tier starts.
    pub fn with_expert_threshold(mut self, position: usize) -> Self {
        self.expert_threshold = position;
        self
    }

    /// Set both round time budgets.
    pub fn with_time_budgets(mut self, standard_secs: u32, expert_secs: u32) -> Self {
        self.standard_time_secs = standard_secs;
        self.expert_time_secs = expert_secs;
        self
    }

    /// Set the persistence retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the fallback fact.
    pub fn with_fallback_fact(mut self, fact: impl Into<String>) -> Self {
        self.fallback_fact = fact.into();
        self
    }
}
