//! Score bookkeeping
//!
//! Tracks goals per side within a match and matches won overall.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_SCORE;

/// One half of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// What a recorded goal led to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalOutcome {
    /// Score changed, match continues
    Scored { scorer: Side },
    /// Scorer reached the winning score; match scores are reset
    MatchWon { winner: Side },
}

/// Goals in the current match plus matches won
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scoreboard {
    pub left: u32,
    pub right: u32,
    pub max_score: u32,
    #[serde(default)]
    pub left_matches: u32,
    #[serde(default)]
    pub right_matches: u32,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new(MAX_SCORE)
    }
}

impl Scoreboard {
    pub fn new(max_score: u32) -> Self {
        Self {
            left: 0,
            right: 0,
            max_score,
            left_matches: 0,
            right_matches: 0,
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn matches_won(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left_matches,
            Side::Right => self.right_matches,
        }
    }

    /// Credit a goal scored into `owner`'s net to the other side
    pub fn record_goal(&mut self, owner: Side) -> GoalOutcome {
        let scorer = owner.opponent();
        let score = match scorer {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        *score += 1;

        if *score >= self.max_score {
            match scorer {
                Side::Left => self.left_matches += 1,
                Side::Right => self.right_matches += 1,
            }
            self.reset();
            GoalOutcome::MatchWon { winner: scorer }
        } else {
            GoalOutcome::Scored { scorer }
        }
    }

    /// Clear the current match score, keeping matches won
    pub fn reset(&mut self) {
        self.left = 0;
        self.right = 0;
    }

    /// Side ahead in the current match, if any
    pub fn leader(&self) -> Option<Side> {
        match self.left.cmp(&self.right) {
            std::cmp::Ordering::Greater => Some(Side::Left),
            std::cmp::Ordering::Less => Some(Side::Right),
            std::cmp::Ordering::Equal => None,
        }
    }
}
