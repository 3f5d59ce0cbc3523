// Import required modules and crates.
use rand::Rng; // RNG utilities from the rand crate for generating random numbers.
use serde::{Deserialize, Serialize};
use std::fmt;

// Categorical result of a skill check: two dice plus the ability modifier,
// judged against fixed thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollOutcome {
    FullSuccess,   // total >= 10
    SuccessAtCost, // total >= 7
    Failure,       // anything below
}

impl RollOutcome {
    // Localized label shown to the player and quoted back to the generator.
    pub fn korean_label(&self) -> &'static str {
        match self {
            RollOutcome::FullSuccess => "완전한 성공",
            RollOutcome::SuccessAtCost => "대가를 치르는 성공",
            RollOutcome::Failure => "실패",
        }
    }
}

impl fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.korean_label())
    }
}

// Classify a check total into its outcome category.
pub fn outcome_for(total: i32) -> RollOutcome {
    if total >= 10 {
        RollOutcome::FullSuccess
    } else if total >= 7 {
        RollOutcome::SuccessAtCost
    } else {
        RollOutcome::Failure
    }
}

// Structure holding the full breakdown of one skill check.
#[derive(Debug, Clone, Serialize)]
pub struct SkillRoll {
    pub dice1: u8,
    pub dice2: u8,
    pub modifier: i32,
    pub total: i32,
    pub outcome: RollOutcome,
}

// Roll two independent six-sided dice and apply the ability modifier.
// The RNG is passed in so callers can seed it.
pub fn skill_check(rng: &mut impl Rng, modifier: i32) -> SkillRoll {
    let dice1 = roll_die(rng);
    let dice2 = roll_die(rng);
    let total = i32::from(dice1) + i32::from(dice2) + modifier;
    SkillRoll {
        dice1,
        dice2,
        modifier,
        total,
        outcome: outcome_for(total),
    }
}

// Helper function to roll a single die.
fn roll_die(rng: &mut impl Rng) -> u8 {
    rng.random_range(1..=6)
}
