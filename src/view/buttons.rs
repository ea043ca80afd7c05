use crate::models::rating::Vote;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoteButtons {
    pub credible_active: bool,
    pub not_credible_active: bool,
}

pub fn vote_buttons(vote: Vote) -> VoteButtons {
    VoteButtons {
        credible_active: vote == Vote::Up,
        not_credible_active: vote == Vote::Down,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_most_one_button_is_active() {
        for vote in [Vote::Down, Vote::None, Vote::Up] {
            let buttons = vote_buttons(vote);
            assert!(!(buttons.credible_active && buttons.not_credible_active));
        }
        assert!(vote_buttons(Vote::Up).credible_active);
        assert!(vote_buttons(Vote::Down).not_credible_active);
        assert_eq!(
            vote_buttons(Vote::None),
            VoteButtons {
                credible_active: false,
                not_credible_active: false
            }
        );
    }
}
