//! Region unlock gating.
//!
//! Regions form a linear chain. The base region is always playable; every
//! other region needs a best score on its predecessor at or above a fixed
//! threshold.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use gq_core::Region;

use crate::error::{RankingError, RankingResult};

/// One link in the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockRule {
    /// The region being unlocked.
    pub region: Region,
    /// The region that must be played first.
    pub prerequisite: Region,
    /// Minimum best score on the prerequisite.
    pub threshold: u32,
}

/// The fixed unlock configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockChain {
    base: Region,
    rules: Vec<UnlockRule>,
}

impl Default for UnlockChain {
    /// `colombia` → `suramerica` (12) → `centro_norteamerica` (10).
    fn default() -> Self {
        Self {
            base: Region::new("colombia"),
            rules: vec![
                UnlockRule {
                    region: Region::new("suramerica"),
                    prerequisite: Region::new("colombia"),
                    threshold: 12,
                },
                UnlockRule {
                    region: Region::new("centro_norteamerica"),
                    prerequisite: Region::new("suramerica"),
                    threshold: 10,
                },
            ],
        }
    }
}

impl UnlockChain {
    /// A chain with only the base region.
    pub fn new(base: Region) -> Self {
        Self {
            base,
            rules: Vec::new(),
        }
    }

    /// Append a region unlocked by `threshold` points on `prerequisite`.
    ///
    /// The prerequisite must already be in the chain and must not unlock
    /// anything else yet.
    pub fn with_rule(
        mut self,
        region: Region,
        prerequisite: Region,
        threshold: u32,
    ) -> RankingResult<Self> {
        if self.contains(&region) {
            return Err(RankingError::DuplicateRegion(region));
        }
        if !self.contains(&prerequisite) {
            return Err(RankingError::UnknownPrerequisite(prerequisite));
        }
        if let Some(existing) = self.rules.iter().find(|r| r.prerequisite == prerequisite) {
            return Err(RankingError::Branching {
                prerequisite,
                existing: existing.region.clone(),
            });
        }
        self.rules.push(UnlockRule {
            region,
            prerequisite,
            threshold,
        });
        Ok(self)
    }

    /// The always-unlocked region.
    pub fn base(&self) -> &Region {
        &self.base
    }

    /// Every region, base first, in unlock order.
    pub fn regions(&self) -> Vec<&Region> {
        let mut out = vec![&self.base];
        let mut current = &self.base;
        while let Some(rule) = self.rules.iter().find(|r| &r.prerequisite == current) {
            out.push(&rule.region);
            current = &rule.region;
        }
        out
    }

    /// The rule that unlocks `region`, if it is not the base.
    pub fn rule_for(&self, region: &Region) -> Option<&UnlockRule> {
        self.rules.iter().find(|r| &r.region == region)
    }

    /// Whether `region` belongs to the chain.
    pub fn contains(&self, region: &Region) -> bool {
        &self.base == region || self.rule_for(region).is_some()
    }

    /// Whether a player with these best scores may play `region`.
    ///
    /// Regions outside the chain are locked.
    pub fn is_unlocked(&self, region: &Region, best_scores: &HashMap<Region, u32>) -> bool {
        if region == &self.base {
            return true;
        }
        match self.rule_for(region) {
            Some(rule) => best_scores
                .get(&rule.prerequisite)
                .is_some_and(|best| *best >= rule.threshold),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(pairs: &[(&str, u32)]) -> HashMap<Region, u32> {
        pairs.iter().map(|(r, s)| (Region::new(*r), *s)).collect()
    }

    #[test]
    fn base_always_unlocked() {
        let chain = UnlockChain::default();
        assert!(chain.is_unlocked(&Region::new("colombia"), &HashMap::new()));
    }

    #[test]
    fn threshold_is_inclusive() {
        let chain = UnlockChain::default();
        let sur = Region::new("suramerica");
        assert!(!chain.is_unlocked(&sur, &scores(&[("colombia", 11)])));
        assert!(chain.is_unlocked(&sur, &scores(&[("colombia", 12)])));
        assert!(chain.is_unlocked(&sur, &scores(&[("colombia", 15)])));
    }

    #[test]
    fn missing_prerequisite_record_locks() {
        let chain = UnlockChain::default();
        assert!(!chain.is_unlocked(&Region::new("suramerica"), &HashMap::new()));
    }

    #[test]
    fn third_region_depends_only_on_second() {
        let chain = UnlockChain::default();
        let norte = Region::new("centro_norteamerica");
        assert!(!chain.is_unlocked(&norte, &scores(&[("colombia", 15)])));
        assert!(!chain.is_unlocked(&norte, &scores(&[("suramerica", 9)])));
        assert!(chain.is_unlocked(&norte, &scores(&[("suramerica", 10)])));
    }

    #[test]
    fn unknown_region_locked() {
        let chain = UnlockChain::default();
        assert!(!chain.is_unlocked(&Region::new("europa"), &scores(&[("colombia", 15)])));
    }

    #[test]
    fn regions_in_chain_order() {
        let chain = UnlockChain::default();
        let names: Vec<&str> = chain.regions().iter().map(|r| r.as_str()).collect();
        assert_eq!(names, vec!["colombia", "suramerica", "centro_norteamerica"]);
    }

    #[test]
    fn builder_validates_linear_chain() {
        let chain = UnlockChain::new(Region::new("a"))
            .with_rule(Region::new("b"), Region::new("a"), 5)
            .unwrap();
        assert_eq!(
            chain.clone().with_rule(Region::new("c"), Region::new("z"), 1),
            Err(RankingError::UnknownPrerequisite(Region::new("z")))
        );
        assert_eq!(
            chain.clone().with_rule(Region::new("b"), Region::new("a"), 1),
            Err(RankingError::DuplicateRegion(Region::new("b")))
        );
        assert_eq!(
            chain.clone().with_rule(Region::new("c"), Region::new("a"), 1),
            Err(RankingError::Branching {
                prerequisite: Region::new("a"),
                existing: Region::new("b"),
            })
        );
        let chain = chain.with_rule(Region::new("c"), Region::new("b"), 3).unwrap();
        assert_eq!(chain.regions().len(), 3);
        assert_eq!(chain.rule_for(&Region::new("c")).unwrap().threshold, 3);
    }
}
