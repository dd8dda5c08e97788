//! Quiz session management.
//!
//! `SessionEngine` owns the question queue, the current position, the score,
//! and the active round's timer. It moves through
//! `InRound → Feedback → InRound → … → Complete`. Answer submission and timer
//! expiry race for each round; whichever arrives first resolves it and the
//! other becomes a no-op.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use gq_core::{AttemptRecord, AttemptSink, Place, Player, RegionCatalog};

use crate::config::QuizConfig;
use crate::error::{QuizError, QuizResult};
use crate::persist::{self, PersistenceStatus};
use crate::round::{Round, RoundMode};
use crate::timer::{RoundTimer, TimerTick};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// A round is waiting for an answer.
    InRound,
    /// The round is resolved and waiting for the player to continue.
    Feedback,
    /// Every round has been played.
    Complete,
}

/// How a round was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    /// Whether the answer scored.
    pub correct: bool,
    /// Whether the timer ran out before an answer arrived.
    pub timed_out: bool,
    /// The submitted answer, if any.
    pub submitted: Option<String>,
    /// The correct answer.
    pub expected: String,
    /// Trivia, shown only after a correct answer.
    pub fact: Option<String>,
    /// Image shown with the trivia.
    pub image_url: Option<String>,
    /// Seconds the round took.
    pub elapsed_secs: u32,
}

/// Result of delivering an answer or expiry event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// This event resolved the round.
    Resolved(Feedback),
    /// The round was already resolved, or none is active.
    Ignored,
}

/// Result of continuing from feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The next round is active.
    NextRound,
    /// The session finished.
    Complete(SessionSummary),
    /// Not in feedback; nothing happened.
    Ignored,
}

/// The result of a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// The record handed to persistence.
    pub record: AttemptRecord,
    /// Whether persistence accepted it. `Pending` until
    /// [`SessionEngine::deliver_result`] runs.
    pub persistence: PersistenceStatus,
}

/// Read-only view of session progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Lifecycle phase.
    pub phase: SessionPhase,
    /// 0-based index of the current round.
    pub position: usize,
    /// Rounds in the session.
    pub total_questions: usize,
    /// Correct answers so far.
    pub score: u32,
    /// Seconds spent on resolved rounds.
    pub elapsed_secs: u32,
    /// Seconds left in the active round.
    pub remaining_secs: Option<u32>,
}

enum Phase {
    InRound,
    Feedback(Feedback),
    Complete(SessionSummary),
}

/// A single playthrough of one region.
pub struct SessionEngine<S: AttemptSink> {
    catalog: RegionCatalog,
    player: Player,
    config: QuizConfig,
    sink: S,
    rng: StdRng,
    queue: Vec<Place>,
    position: usize,
    score: u32,
    elapsed_secs: u32,
    round: Option<Round>,
    timer: Option<RoundTimer>,
    phase: Phase,
}

impl<S: AttemptSink> SessionEngine<S> {
    /// Start a session over `catalog`, writing the result to `sink`.
    ///
    /// Fails with [`QuizError::DataUnavailable`] for an empty catalog.
    pub fn start(
        catalog: RegionCatalog,
        player: Player,
        config: QuizConfig,
        sink: S,
    ) -> QuizResult<Self> {
        if catalog.is_empty() {
            return Err(QuizError::DataUnavailable(catalog.region().clone()));
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut session = Self {
            catalog,
            player,
            config,
            sink,
            rng,
            queue: Vec::new(),
            position: 0,
            score: 0,
            elapsed_secs: 0,
            round: None,
            timer: None,
            phase: Phase::InRound,
        };
        session.begin();
        Ok(session)
    }

    /// Throw away all progress and start over with a fresh queue.
    pub fn restart(&mut self) {
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
        }
        self.begin();
    }

    fn begin(&mut self) {
        let mut queue = self.catalog.places().to_vec();
        queue.shuffle(&mut self.rng);
        queue.truncate(self.config.question_count.max(1));
        self.queue = queue;
        self.position = 0;
        self.score = 0;
        self.elapsed_secs = 0;

        tracing::info!(
            region = %self.catalog.region(),
            player = %self.player.id,
            questions = self.queue.len(),
            "session started"
        );
        self.open_round();
    }

    fn open_round(&mut self) {
        let round = Round::build(
            &self.queue[self.position],
            self.position,
            &self.catalog,
            &self.config,
            &mut self.rng,
        );
        self.timer = Some(RoundTimer::start(round.time_budget_secs()));
        self.round = Some(round);
        self.phase = Phase::InRound;
    }

    /// Submit an answer for the active round.
    ///
    /// An empty typed answer, or a multiple-choice answer that is not one of
    /// the options, is rejected with [`QuizError::InvalidAnswerInput`] and the
    /// round stays active. Outside a round the call is ignored.
    pub fn submit(&mut self, answer: &str) -> QuizResult<Resolution> {
        if !matches!(self.phase, Phase::InRound) {
            return Ok(Resolution::Ignored);
        }
        let Some(round) = &self.round else {
            return Ok(Resolution::Ignored);
        };

        match round.mode() {
            RoundMode::FreeText if answer.trim().is_empty() => {
                return Err(QuizError::InvalidAnswerInput(
                    "type an answer before submitting".to_string(),
                ));
            }
            RoundMode::Choice { options } if !options.iter().any(|o| o == answer) => {
                return Err(QuizError::InvalidAnswerInput(format!(
                    "'{answer}' is not one of the options"
                )));
            }
            _ => {}
        }

        let correct = round.is_correct(answer);
        Ok(self.resolve(Some(answer), correct))
    }

    /// Deliver a timer expiry for the active round.
    ///
    /// Counts as a wrong answer. Ignored if the round is already resolved.
    pub fn expire(&mut self) -> Resolution {
        if !matches!(self.phase, Phase::InRound) {
            return Resolution::Ignored;
        }
        self.resolve(None, false)
    }

    /// Advance the round timer by one second.
    ///
    /// Returns the feedback when this tick ran the timer out.
    pub fn tick(&mut self) -> Option<Feedback> {
        if !matches!(self.phase, Phase::InRound) {
            return None;
        }
        let tick = self.timer.as_mut().map(RoundTimer::tick)?;
        match tick {
            TimerTick::Expired => match self.expire() {
                Resolution::Resolved(feedback) => Some(feedback),
                Resolution::Ignored => None,
            },
            TimerTick::Running { .. } | TimerTick::Inactive => None,
        }
    }

    fn resolve(&mut self, submitted: Option<&str>, correct: bool) -> Resolution {
        let Some(round) = &self.round else {
            return Resolution::Ignored;
        };
        let timed_out = submitted.is_none();
        let elapsed = match self.timer.take() {
            Some(mut timer) => {
                timer.cancel();
                if timed_out {
                    timer.budget()
                } else {
                    timer.elapsed().max(1)
                }
            }
            None => round.time_budget_secs(),
        };

        if correct {
            self.score += 1;
        }
        self.elapsed_secs += elapsed;

        let feedback = Feedback {
            correct,
            timed_out,
            submitted: submitted.map(str::to_string),
            expected: round.expected_answer().to_string(),
            fact: correct.then(|| round.fact().to_string()),
            image_url: round.place().image_url.clone().filter(|_| correct),
            elapsed_secs: elapsed,
        };

        tracing::debug!(
            position = self.position,
            place = %round.place().id,
            correct,
            timed_out,
            elapsed,
            "round resolved"
        );
        self.phase = Phase::Feedback(feedback.clone());
        Resolution::Resolved(feedback)
    }

    /// Continue from feedback to the next round, or finish the session.
    ///
    /// Finishing only builds the attempt record. Writing it to the sink is a
    /// separate step, [`deliver_result`](Self::deliver_result), so reaching
    /// `Complete` never waits on persistence.
    pub fn advance(&mut self) -> Advance {
        if !matches!(self.phase, Phase::Feedback(_)) {
            return Advance::Ignored;
        }
        let next = self.position + 1;
        if next >= self.queue.len() {
            return Advance::Complete(self.complete());
        }
        self.position = next;
        self.open_round();
        Advance::NextRound
    }

    fn complete(&mut self) -> SessionSummary {
        self.round = None;
        self.timer = None;

        let total = u32::try_from(self.queue.len()).unwrap_or(u32::MAX);
        let record = AttemptRecord::new(
            &self.player,
            self.catalog.region().clone(),
            self.score,
            total,
            Some(self.elapsed_secs),
        );

        tracing::info!(
            region = %record.region,
            player = %record.player_id,
            score = record.score,
            total = record.total_questions,
            secs = self.elapsed_secs,
            "session complete"
        );

        let summary = SessionSummary {
            record,
            persistence: PersistenceStatus::Pending,
        };
        self.phase = Phase::Complete(summary.clone());
        summary
    }

    /// Write the finished session's record to the sink, retrying under the
    /// configured policy. `sleep` waits out each backoff.
    ///
    /// Runs at most once per session; later calls return the stored status.
    /// Returns `None` before the session is complete. A restart drops a
    /// record that was never delivered.
    pub fn deliver_result<F>(&mut self, sleep: F) -> Option<&PersistenceStatus>
    where
        F: FnMut(Duration),
    {
        let Phase::Complete(summary) = &mut self.phase else {
            return None;
        };
        if summary.persistence.is_pending() {
            summary.persistence =
                persist::deliver(&mut self.sink, &summary.record, &self.config.retry, sleep);
        }
        Some(&summary.persistence)
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        match self.phase {
            Phase::InRound => SessionPhase::InRound,
            Phase::Feedback(_) => SessionPhase::Feedback,
            Phase::Complete(_) => SessionPhase::Complete,
        }
    }

    /// The round being played or reviewed. `None` once complete.
    pub fn current_round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// The active round's timer.
    pub fn timer(&self) -> Option<&RoundTimer> {
        self.timer.as_ref()
    }

    /// Feedback for the last resolved round, while in feedback.
    pub fn feedback(&self) -> Option<&Feedback> {
        match &self.phase {
            Phase::Feedback(feedback) => Some(feedback),
            _ => None,
        }
    }

    /// The session result, once complete.
    pub fn summary(&self) -> Option<&SessionSummary> {
        match &self.phase {
            Phase::Complete(summary) => Some(summary),
            _ => None,
        }
    }

    /// Correct answers so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// 0-based index of the current round.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Rounds in this session.
    pub fn total_questions(&self) -> usize {
        self.queue.len()
    }

    /// The places of this session in play order.
    pub fn queue(&self) -> &[Place] {
        &self.queue
    }

    /// The player.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The catalog being played.
    pub fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }

    /// The persistence sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// A copy of the current progress.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase(),
            position: self.position,
            total_questions: self.queue.len(),
            score: self.score,
            elapsed_secs: self.elapsed_secs,
            remaining_secs: self
                .timer
                .as_ref()
                .filter(|t| t.is_active())
                .map(RoundTimer::remaining),
        }
    }
}
