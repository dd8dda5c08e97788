//! Selection of plausible wrong answers.
//!
//! Standard rounds prefer the place's own alternate cities. Otherwise, and
//! always for inverse rounds, wrong answers come from other places in the
//! catalog. Small catalogs yield fewer distractors instead of an error.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use gq_core::{Place, RegionCatalog};

use crate::matcher::normalize;
use crate::round::QuestionDirection;

/// Pick up to `count` wrong answers for a place.
///
/// The correct answer for `direction` is never returned, and entries that
/// normalize to the same text are collapsed into one.
pub fn select(
    place: &Place,
    catalog: &RegionCatalog,
    direction: QuestionDirection,
    count: usize,
    rng: &mut StdRng,
) -> Vec<String> {
    if count == 0 {
        return Vec::new();
    }
    let correct = normalize(direction.answer(place));

    if direction == QuestionDirection::Standard {
        let alternates = distinct_excluding(
            place.other_cities.iter().map(String::as_str),
            &correct,
        );
        if alternates.len() >= count {
            return sample(&alternates, count, rng);
        }
    }

    let others = distinct_excluding(
        catalog.others(place.id).map(|p| direction.answer(p)),
        &correct,
    );
    sample(&others, count, rng)
}

/// Deduplicate by normalized text, dropping anything equal to `correct`.
fn distinct_excluding<'a>(
    candidates: impl Iterator<Item = &'a str>,
    correct: &str,
) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    candidates
        .filter(|c| {
            let key = normalize(c);
            !key.is_empty() && key != correct && seen.insert(key)
        })
        .collect()
}

fn sample(pool: &[&str], count: usize, rng: &mut StdRng) -> Vec<String> {
    pool.choose_multiple(rng, count.min(pool.len()))
        .map(|s| (*s).to_string())
        .collect()
}
