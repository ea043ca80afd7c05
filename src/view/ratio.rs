use serde::Serialize;

pub const NO_VOTES_TOOLTIP: &str = "No votes yet";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatioBar {
    pub up_percent: f64,
    pub down_percent: f64,
    pub tooltip: String,
}

pub fn ratio_bar(up_votes: u64, down_votes: u64) -> RatioBar {
    let total = up_votes.saturating_add(down_votes);
    if total == 0 {
        return RatioBar {
            up_percent: 50.0,
            down_percent: 50.0,
            tooltip: NO_VOTES_TOOLTIP.to_string(),
        };
    }

    let total = total as f64;
    RatioBar {
        up_percent: up_votes as f64 / total * 100.0,
        down_percent: down_votes as f64 / total * 100.0,
        tooltip: format!("👍 {up_votes} upvotes / 👎 {down_votes} downvotes"),
    }
}

impl RatioBar {
    pub fn pending() -> Self {
        RatioBar {
            up_percent: 50.0,
            down_percent: 50.0,
            tooltip: String::new(),
        }
    }

    pub fn up_width(&self) -> String {
        format!("{}%", self.up_percent)
    }

    pub fn down_width(&self) -> String {
        format!("{}%", self.down_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tally_splits_evenly() {
        let bar = ratio_bar(0, 0);
        assert_eq!(bar.up_percent, 50.0);
        assert_eq!(bar.down_percent, 50.0);
        assert_eq!(bar.tooltip, NO_VOTES_TOOLTIP);
    }

    #[test]
    fn segments_sum_to_whole() {
        for (up, down) in [(1, 0), (0, 7), (3, 1), (1, 2), (13, 29), (1_000_000, 1)] {
            let bar = ratio_bar(up, down);
            assert!((bar.up_percent + bar.down_percent - 100.0).abs() < 1e-9);
            let expected = 100.0 * up as f64 / (up + down) as f64;
            assert!((bar.up_percent - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn tooltip_reports_raw_counts() {
        let bar = ratio_bar(3, 1);
        assert_eq!(bar.up_width(), "75%");
        assert_eq!(bar.down_width(), "25%");
        assert_eq!(bar.tooltip, "👍 3 upvotes / 👎 1 downvotes");
    }
}
