//! Quiz session engine for the geography quiz.
//!
//! Builds rounds from a region catalog (picking distractors, randomizing the
//! question direction, switching to free-text input for the expert tier),
//! runs one countdown per round, evaluates answers, keeps score, and hands
//! the finished result to an [`gq_core::AttemptSink`].

pub mod config;
pub mod distractor;
pub mod error;
pub mod matcher;
pub mod persist;
pub mod round;
pub mod session;
pub mod timer;

pub use config::QuizConfig;
pub use error::{QuizError, QuizResult};
pub use matcher::{matches, normalize};
pub use persist::{PersistenceStatus, RetryPolicy};
pub use round::{Prompt, QuestionDirection, Round, RoundMode, Tier};
pub use session::{
    Advance, Feedback, Resolution, SessionEngine, SessionPhase, SessionSnapshot, SessionSummary,
};
pub use timer::{RoundTimer, TimerTick};
