//! Round construction.
//!
//! A round is one question: a place, the direction it is asked in, how the
//! player answers (picking an option or typing), and its time budget.

use std::fmt;

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};

use gq_core::{Place, RegionCatalog};

use crate::config::QuizConfig;
use crate::distractor;
use crate::matcher;

/// Which side of the place/capital pair the player must supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionDirection {
    /// Shown the place, answer with its capital.
    Standard,
    /// Shown the capital, answer with the place.
    Inverse,
}

impl QuestionDirection {
    /// Pick a direction uniformly at random.
    pub fn random(rng: &mut StdRng) -> Self {
        if rng.random_bool(0.5) {
            Self::Inverse
        } else {
            Self::Standard
        }
    }

    /// The answer a place gives for this direction.
    pub fn answer(self, place: &Place) -> &str {
        match self {
            Self::Standard => &place.capital,
            Self::Inverse => &place.name,
        }
    }

    /// The side of the pair that is shown as the question.
    pub fn subject(self, place: &Place) -> &str {
        match self {
            Self::Standard => &place.name,
            Self::Inverse => &place.capital,
        }
    }
}

impl fmt::Display for QuestionDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Inverse => write!(f, "inverse"),
        }
    }
}

/// Difficulty tier of a round, a pure function of its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Multiple choice with the shorter timer.
    Standard,
    /// Free-text input with the longer timer.
    Expert,
}

impl Tier {
    /// The tier for a 0-based queue position.
    pub fn for_position(position: usize, config: &QuizConfig) -> Self {
        if position >= config.expert_threshold {
            Self::Expert
        } else {
            Self::Standard
        }
    }

    /// Seconds allotted to a round of this tier.
    pub fn time_budget(self, config: &QuizConfig) -> u32 {
        match self {
            Self::Standard => config.standard_time_secs,
            Self::Expert => config.expert_time_secs,
        }
    }
}

/// How the player answers a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundMode {
    /// Pick one of the listed options, shown in this order.
    Choice {
        /// Candidate answers, the correct one included.
        options: Vec<String>,
    },
    /// Type the answer; compared with [`matcher::matches`].
    FreeText,
}

/// The text shown for a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// What kind of thing is shown ("Place" or "Capital").
    pub label: &'static str,
    /// The shown name.
    pub subject: String,
    /// The question asked about it.
    pub question: &'static str,
}

/// A single playable question.
#[derive(Debug, Clone)]
pub struct Round {
    place: Place,
    position: usize,
    direction: QuestionDirection,
    tier: Tier,
    mode: RoundMode,
    time_budget_secs: u32,
    fact: String,
}

impl Round {
    /// Build the round for `place` at queue position `position`.
    pub fn build(
        place: &Place,
        position: usize,
        catalog: &RegionCatalog,
        config: &QuizConfig,
        rng: &mut StdRng,
    ) -> Self {
        let direction = QuestionDirection::random(rng);
        let tier = Tier::for_position(position, config);

        let mode = match tier {
            Tier::Standard => {
                let wanted = config.choice_count.saturating_sub(1);
                let mut options = distractor::select(place, catalog, direction, wanted, rng);
                options.push(direction.answer(place).to_string());
                options.shuffle(rng);
                RoundMode::Choice { options }
            }
            Tier::Expert => RoundMode::FreeText,
        };

        let fact = place
            .fun_facts
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| config.fallback_fact.clone());

        Self {
            place: place.clone(),
            position,
            direction,
            tier,
            mode,
            time_budget_secs: tier.time_budget(config),
            fact,
        }
    }

    /// The place being asked about.
    pub fn place(&self) -> &Place {
        &self.place
    }

    /// 0-based position in the session queue.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The question direction.
    pub fn direction(&self) -> QuestionDirection {
        self.direction
    }

    /// The difficulty tier.
    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// How the player answers.
    pub fn mode(&self) -> &RoundMode {
        &self.mode
    }

    /// The options of a multiple-choice round, if any.
    pub fn options(&self) -> Option<&[String]> {
        match &self.mode {
            RoundMode::Choice { options } => Some(options),
            RoundMode::FreeText => None,
        }
    }

    /// Seconds the player has to answer.
    pub fn time_budget_secs(&self) -> u32 {
        self.time_budget_secs
    }

    /// The fact shown after a correct answer.
    pub fn fact(&self) -> &str {
        &self.fact
    }

    /// The correct answer.
    pub fn expected_answer(&self) -> &str {
        self.direction.answer(&self.place)
    }

    /// Whether a submitted answer is correct.
    ///
    /// Options are members of the option set, so multiple-choice answers are
    /// compared exactly. Typed answers go through the matcher.
    pub fn is_correct(&self, answer: &str) -> bool {
        match &self.mode {
            RoundMode::Choice { .. } => answer == self.expected_answer(),
            RoundMode::FreeText => matcher::matches(answer, self.expected_answer()),
        }
    }

    /// The text to show the player.
    pub fn prompt(&self) -> Prompt {
        let typed = self.mode == RoundMode::FreeText;
        let (label, question) = match (self.direction, typed) {
            (QuestionDirection::Standard, false) => ("Place", "What is its capital?"),
            (QuestionDirection::Standard, true) => ("Place", "Type its capital:"),
            (QuestionDirection::Inverse, false) => ("Capital", "Which place is it the capital of?"),
            (QuestionDirection::Inverse, true) => ("Capital", "Type the place:"),
        };
        Prompt {
            label,
            subject: self.direction.subject(&self.place).to_string(),
            question,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gq_core::{PlaceId, Region};
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn catalog() -> RegionCatalog {
        RegionCatalog::new(
            Region::new("colombia"),
            vec![
                Place::new(1, "Antioquia", "Medellín")
                    .with_other_cities(["Envigado", "Rionegro", "Bello"])
                    .with_fun_facts(["Medellín is the city of eternal spring."]),
                Place::new(2, "Valle del Cauca", "Cali"),
                Place::new(3, "Atlántico", "Barranquilla"),
                Place::new(4, "Bolívar", "Cartagena"),
                Place::new(5, "Santander", "Bucaramanga"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn choice_round_has_four_unique_options() {
        let cat = catalog();
        let cfg = QuizConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        for place in cat.places() {
            for position in 0..cfg.expert_threshold {
                let round = Round::build(place, position, &cat, &cfg, &mut rng);
                assert_eq!(round.tier(), Tier::Standard);
                let options = round.options().unwrap();
                assert_eq!(options.len(), 4);
                let unique: HashSet<&String> = options.iter().collect();
                assert_eq!(unique.len(), 4);
                assert!(options.iter().any(|o| o == round.expected_answer()));
                assert_eq!(round.time_budget_secs(), 15);
            }
        }
    }

    #[test]
    fn expert_round_is_free_text() {
        let cat = catalog();
        let cfg = QuizConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        let place = cat.get(PlaceId(2)).unwrap();
        for position in [10, 11, 14] {
            let round = Round::build(place, position, &cat, &cfg, &mut rng);
            assert_eq!(round.mode(), &RoundMode::FreeText);
            assert!(round.options().is_none());
            assert_eq!(round.time_budget_secs(), 30);
        }
    }

    #[test]
    fn both_directions_occur() {
        let cat = catalog();
        let cfg = QuizConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let place = cat.get(PlaceId(1)).unwrap();
        let directions: HashSet<_> = (0..64)
            .map(|_| Round::build(place, 0, &cat, &cfg, &mut rng).direction())
            .map(|d| d.to_string())
            .collect();
        assert_eq!(directions.len(), 2);
    }

    #[test]
    fn expected_answer_follows_direction() {
        let place = Place::new(1, "Antioquia", "Medellín");
        assert_eq!(QuestionDirection::Standard.answer(&place), "Medellín");
        assert_eq!(QuestionDirection::Inverse.answer(&place), "Antioquia");
        assert_eq!(QuestionDirection::Inverse.subject(&place), "Medellín");
    }

    #[test]
    fn free_text_correctness_is_normalized() {
        let cat = catalog();
        let cfg = QuizConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let round = Round::build(cat.get(PlaceId(1)).unwrap(), 12, &cat, &cfg, &mut rng);
        let typed = crate::matcher::normalize(round.expected_answer()).to_uppercase();
        assert!(round.is_correct(&format!("  {typed} ")));
        assert!(!round.is_correct("Cali"));
    }

    #[test]
    fn choice_correctness_is_exact() {
        let cat = catalog();
        let cfg = QuizConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let round = Round::build(cat.get(PlaceId(3)).unwrap(), 0, &cat, &cfg, &mut rng);
        let expected = round.expected_answer().to_string();
        assert!(round.is_correct(&expected));
        assert!(!round.is_correct(&expected.to_lowercase()));
    }

    #[test]
    fn fact_is_sampled_or_fallback() {
        let cat = catalog();
        let cfg = QuizConfig::default().with_fallback_fact("fallback");
        let mut rng = StdRng::seed_from_u64(1);
        let with_fact = Round::build(cat.get(PlaceId(1)).unwrap(), 0, &cat, &cfg, &mut rng);
        assert_eq!(with_fact.fact(), "Medellín is the city of eternal spring.");
        let without = Round::build(cat.get(PlaceId(2)).unwrap(), 0, &cat, &cfg, &mut rng);
        assert_eq!(without.fact(), "fallback");
    }

    #[test]
    fn prompt_text() {
        let cat = catalog();
        let cfg = QuizConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        let round = Round::build(cat.get(PlaceId(4)).unwrap(), 0, &cat, &cfg, &mut rng);
        let prompt = round.prompt();
        match round.direction() {
            QuestionDirection::Standard => {
                assert_eq!(prompt.label, "Place");
                assert_eq!(prompt.subject, "Bolívar");
            }
            QuestionDirection::Inverse => {
                assert_eq!(prompt.label, "Capital");
                assert_eq!(prompt.subject, "Cartagena");
            }
        }
    }
}
