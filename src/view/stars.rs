use serde::Serialize;

pub const STAR_COUNT: usize = 5;
pub const NO_SCORE_TOOLTIP: &str = "No credibility score yet";

const FILLED_STAR: char = '★';
const EMPTY_STAR: char = '☆';

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StarRating {
    pub filled: usize,
    pub tooltip: String,
}

/// Maps a 0-10 score onto five stars, rounding halves up.
pub fn stars_filled(score: Option<f64>) -> usize {
    match score {
        Some(score) => ((score / 10.0 * STAR_COUNT as f64) + 0.5)
            .floor()
            .clamp(0.0, STAR_COUNT as f64) as usize,
        None => 0,
    }
}

pub fn star_rating(score: Option<f64>) -> StarRating {
    let tooltip = match score {
        Some(score) => format!("Credibility Score: {:.1}/10", round_tenth_half_up(score)),
        None => NO_SCORE_TOOLTIP.to_string(),
    };
    StarRating {
        filled: stars_filled(score),
        tooltip,
    }
}

/// Rounds to one decimal with ties going up, so 8.25 shows as 8.3.
fn round_tenth_half_up(score: f64) -> f64 {
    (score * 10.0 + 0.5).floor() / 10.0
}

impl StarRating {
    /// Before the score read completes: five empty cells, no tooltip.
    pub fn pending() -> Self {
        StarRating {
            filled: 0,
            tooltip: String::new(),
        }
    }

    pub fn empty(&self) -> usize {
        STAR_COUNT - self.filled.min(STAR_COUNT)
    }

    pub fn glyphs(&self) -> String {
        let filled = self.filled.min(STAR_COUNT);
        std::iter::repeat(FILLED_STAR)
            .take(filled)
            .chain(std::iter::repeat(EMPTY_STAR).take(self.empty()))
            .collect()
    }
}
