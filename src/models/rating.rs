use serde::{Deserialize, Serialize};
use std::fmt;

/// Central, algorithmic rating for a site. `score` is `None` until the
/// service has scored the domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredibilityRating {
    pub site: String,
    #[serde(default)]
    pub score: Option<f64>, // 0.0..=10.0
}

/// Aggregate community tally for a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityRating {
    pub site: String,
    #[serde(default)]
    pub up_votes: u64,
    #[serde(default)]
    pub down_votes: u64,
}

impl CommunityRating {
    pub fn total(&self) -> u64 {
        self.up_votes.saturating_add(self.down_votes)
    }
}

/// A single user's vote on a site. Travels over the wire as -1, 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Vote {
    Down,
    #[default]
    None,
    Up,
}

impl Vote {
    pub fn value(self) -> i64 {
        match self {
            Vote::Down => -1,
            Vote::None => 0,
            Vote::Up => 1,
        }
    }

    /// Vote to submit when `clicked` is pressed while `self` is stored.
    /// Pressing the already-active button withdraws the vote.
    pub fn toggled(self, clicked: Vote) -> Vote {
        if self == clicked {
            Vote::None
        } else {
            clicked
        }
    }
}

impl TryFrom<i64> for Vote {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Vote::Down),
            0 => Ok(Vote::None),
            1 => Ok(Vote::Up),
            other => Err(format!("vote must be -1, 0 or 1, got {other}")),
        }
    }
}

impl From<Vote> for i64 {
    fn from(vote: Vote) -> Self {
        vote.value()
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// One entry of `GET /ratings/my/all`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserVote {
    pub site: String,
    pub value: Vote,
}
