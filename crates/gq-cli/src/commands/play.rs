use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use colored::{Color, Colorize};

use gq_core::{
    AttemptRecord, AttemptSink, CatalogSource, CoreResult, IdentityProvider, Player, Region,
};
use gq_quiz::{
    Advance, Feedback, PersistenceStatus, QuizConfig, QuizError, Resolution, RetryPolicy,
    RoundMode, RoundTimer, SessionEngine, SessionPhase, matches,
};
use gq_ranking::{UnlockChain, format_duration};

use crate::store::JsonStore;

const TICK: Duration = Duration::from_secs(1);
const BAR_WIDTH: usize = 20;
const SAVE_ATTEMPTS: u32 = 3;

/// Sink for guests: results are shown but never stored.
struct GuestSink;

impl AttemptSink for GuestSink {
    fn record_attempt(&mut self, record: &AttemptRecord) -> CoreResult<()> {
        tracing::debug!(score = record.score, "guest result discarded");
        Ok(())
    }
}

pub fn run(
    store: &mut JsonStore,
    identity: &impl IdentityProvider,
    region: &str,
    seed: Option<u64>,
    questions: Option<usize>,
) -> Result<(), String> {
    let region = Region::new(region);
    let player = identity.current_player();

    let chain = UnlockChain::default();
    if region != *chain.base() && !is_unlocked(&*store, &chain, &region, player.as_ref())? {
        return Err(match chain.rule_for(&region) {
            Some(rule) => format!(
                "region \"{region}\" is locked: score at least {} on {} first",
                rule.threshold, rule.prerequisite
            ),
            None => format!("unknown region \"{region}\""),
        });
    }

    let catalog = store.load_catalog(&region).map_err(|e| e.to_string())?;

    let mut config = QuizConfig::default()
        .with_retry(RetryPolicy::default().with_max_attempts(SAVE_ATTEMPTS));
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    if let Some(count) = questions {
        config = config.with_question_count(count);
    }

    println!("  {} {}", "Geography quiz:".bold(), region);
    match player {
        Some(player) => {
            println!("  Playing as {}\n", player.display_label().bold());
            let engine = SessionEngine::start(catalog, player, config, store)
                .map_err(|e| e.to_string())?;
            play_session(engine, false)
        }
        None => {
            println!("  Playing as guest; results will not be saved.\n");
            let guest = Player::with_label("guest", "");
            let engine = SessionEngine::start(catalog, guest, config, GuestSink)
                .map_err(|e| e.to_string())?;
            play_session(engine, true)
        }
    }
}

/// Check a region after the base against the player's history.
fn is_unlocked(
    store: &JsonStore,
    chain: &UnlockChain,
    region: &Region,
    player: Option<&Player>,
) -> Result<bool, String> {
    let best = super::player_best_scores(store, player)?;
    Ok(chain.is_unlocked(region, &best))
}

fn play_session<S: AttemptSink>(mut engine: SessionEngine<S>, guest: bool) -> Result<(), String> {
    let lines = spawn_stdin_reader();
    print_round(&engine)?;
    let mut next_tick = Instant::now() + TICK;

    loop {
        match engine.phase() {
            SessionPhase::InRound => {
                let wait = next_tick.saturating_duration_since(Instant::now());
                match lines.recv_timeout(wait) {
                    Ok(line) => {
                        if let Some(feedback) = submit(&mut engine, &line)? {
                            print_feedback(&feedback);
                        }
                    }
                    Err(RecvTimeoutError::Timeout) => {
                        next_tick += TICK;
                        match engine.tick() {
                            Some(feedback) => print_feedback(&feedback),
                            None => print_timer_update(engine.timer())?,
                        }
                    }
                    Err(RecvTimeoutError::Disconnected) => {
                        println!("\n  Session ended before the last round.");
                        return Ok(());
                    }
                }
            }
            SessionPhase::Feedback => {
                if lines.recv().is_err() {
                    return Ok(());
                }
                match engine.advance() {
                    Advance::NextRound => {
                        print_round(&engine)?;
                        next_tick = Instant::now() + TICK;
                    }
                    Advance::Complete(summary) => {
                        print_summary(&summary.record);
                        if let Some(status) = engine.deliver_result(thread::sleep) {
                            print_persistence(status, guest);
                        }
                    }
                    Advance::Ignored => {}
                }
            }
            SessionPhase::Complete => {
                println!("  Press Enter to play again, or Ctrl-D to quit.");
                if lines.recv().is_err() {
                    return Ok(());
                }
                engine.restart();
                println!();
                print_round(&engine)?;
                next_tick = Instant::now() + TICK;
            }
        }
    }
}

/// Forward stdin lines over a channel so the round timer keeps running
/// while the player types. The channel closes on EOF.
fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn submit<S: AttemptSink>(
    engine: &mut SessionEngine<S>,
    line: &str,
) -> Result<Option<Feedback>, String> {
    let input = line.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let answer = match engine.current_round().and_then(|r| r.options()) {
        Some(options) => pick_option(options, input),
        None => input.to_string(),
    };
    match engine.submit(&answer) {
        Ok(Resolution::Resolved(feedback)) => Ok(Some(feedback)),
        Ok(Resolution::Ignored) => Ok(None),
        Err(QuizError::InvalidAnswerInput(reason)) => {
            println!("  {}", reason.yellow());
            Ok(None)
        }
        Err(e) => Err(e.to_string()),
    }
}

/// Map a typed number or option text to the option it names.
fn pick_option(options: &[String], input: &str) -> String {
    let by_number = input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| options.get(i));
    by_number
        .or_else(|| options.iter().find(|o| matches(o, input)))
        .cloned()
        .unwrap_or_else(|| input.to_string())
}

fn print_round<S: AttemptSink>(engine: &SessionEngine<S>) -> Result<(), String> {
    let Some(round) = engine.current_round() else {
        return Ok(());
    };
    let prompt = round.prompt();
    println!(
        "  {} {}/{}  {} {}",
        "Round".bold(),
        engine.position() + 1,
        engine.total_questions(),
        "Score".bold(),
        engine.score()
    );
    println!("  {}: {}", prompt.label, prompt.subject.bold());
    println!("  {}", prompt.question);
    match round.mode() {
        RoundMode::Choice { options } => {
            for (i, option) in options.iter().enumerate() {
                println!("    {}. {option}", i + 1);
            }
        }
        RoundMode::FreeText => println!("  {}", "Expert round: type the answer.".cyan()),
    }
    if let Some(timer) = engine.timer() {
        println!("  {}", timer_bar(timer));
    }
    print!("> ");
    io::stdout().flush().map_err(|e| e.to_string())
}

fn print_timer_update(timer: Option<&RoundTimer>) -> Result<(), String> {
    let Some(timer) = timer else {
        return Ok(());
    };
    let remaining = timer.remaining();
    if remaining > 0 && (remaining % 5 == 0 || remaining <= 3) {
        println!("\n  {}", timer_bar(timer));
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn timer_bar(timer: &RoundTimer) -> String {
    let fraction = timer.fraction_remaining();
    let filled = ((fraction * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));
    format!("{} {}s", bar.color(bar_color(fraction)), timer.remaining())
}

fn bar_color(fraction: f64) -> Color {
    if fraction >= 0.6 {
        Color::Green
    } else if fraction >= 0.3 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn print_feedback(feedback: &Feedback) {
    println!();
    if feedback.correct {
        println!("  {}", "Correct!".green().bold());
        if let Some(fact) = &feedback.fact {
            println!("  {fact}");
        }
        if let Some(url) = &feedback.image_url {
            println!("  {}", url.dimmed());
        }
    } else {
        let headline = if feedback.timed_out {
            "Time's up!"
        } else {
            "Wrong."
        };
        println!("  {}", headline.red().bold());
        println!("  The answer was {}.", feedback.expected.bold());
    }
    println!("  Press Enter to continue.");
}

fn print_summary(record: &AttemptRecord) {
    println!();
    println!(
        "  {} {}/{} in {}",
        "Final score:".bold(),
        record.score,
        record.total_questions,
        format_duration(record.reliable_time())
    );
}

fn print_persistence(status: &PersistenceStatus, guest: bool) {
    match status {
        PersistenceStatus::Pending => {}
        PersistenceStatus::Saved { .. } if guest => {}
        PersistenceStatus::Saved { .. } => println!("  Result saved."),
        PersistenceStatus::Failed { attempts, reason } => println!(
            "  {}",
            format!("warning: result not saved after {attempts} attempt(s): {reason}").yellow()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        ["Medellín", "Cali", "Bogotá", "Tunja"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn picks_option_by_number() {
        assert_eq!(pick_option(&options(), "3"), "Bogotá");
        assert_eq!(pick_option(&options(), "1"), "Medellín");
    }

    #[test]
    fn picks_option_by_text_ignoring_accents() {
        assert_eq!(pick_option(&options(), "medellin"), "Medellín");
    }

    #[test]
    fn unknown_input_passes_through() {
        assert_eq!(pick_option(&options(), "0"), "0");
        assert_eq!(pick_option(&options(), "9"), "9");
        assert_eq!(pick_option(&options(), "Lima"), "Lima");
    }

    #[test]
    fn bar_colors_by_fraction() {
        assert_eq!(bar_color(1.0), Color::Green);
        assert_eq!(bar_color(0.6), Color::Green);
        assert_eq!(bar_color(0.5), Color::Yellow);
        assert_eq!(bar_color(0.3), Color::Yellow);
        assert_eq!(bar_color(0.1), Color::Red);
        assert_eq!(bar_color(0.0), Color::Red);
    }

    #[test]
    fn timer_bar_shows_remaining_seconds() {
        colored::control::set_override(false);
        let mut timer = RoundTimer::start(10);
        timer.tick();
        let bar = timer_bar(&timer);
        assert!(bar.ends_with(" 9s"));
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 18);
    }
}
