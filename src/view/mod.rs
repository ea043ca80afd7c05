pub mod buttons;
pub mod ratio;
pub mod stars;

use crate::models::popup::{Phase, PopupState};
use buttons::{vote_buttons, VoteButtons};
use ratio::{ratio_bar, RatioBar};
use serde_json::{json, Map, Value};
use stars::{star_rating, StarRating};

/// Stable identifiers of the popup's elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    DomainName,
    StatusMessage,
    StarRating,
    UpvoteRatio,
    DownvoteRatio,
    VoteBar,
    NumRatings,
    CredibleBtn,
    NotCredibleBtn,
}

impl ElementId {
    pub const ALL: [ElementId; 9] = [
        ElementId::DomainName,
        ElementId::StatusMessage,
        ElementId::StarRating,
        ElementId::UpvoteRatio,
        ElementId::DownvoteRatio,
        ElementId::VoteBar,
        ElementId::NumRatings,
        ElementId::CredibleBtn,
        ElementId::NotCredibleBtn,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ElementId::DomainName => "domain-name",
            ElementId::StatusMessage => "status-message",
            ElementId::StarRating => "star-rating",
            ElementId::UpvoteRatio => "upvote-ratio",
            ElementId::DownvoteRatio => "downvote-ratio",
            ElementId::VoteBar => "vote-bar",
            ElementId::NumRatings => "num-ratings",
            ElementId::CredibleBtn => "credible-btn",
            ElementId::NotCredibleBtn => "not-credible-btn",
        }
    }
}

/// Everything a surface needs to draw one frame, derived from a state
/// snapshot and nothing else.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupView {
    pub phase: Phase,
    pub domain_name: String,
    pub status_message: String,
    pub stars: StarRating,
    pub ratio: RatioBar,
    pub num_ratings: String,
    pub buttons: VoteButtons,
}

impl PopupView {
    pub fn from_state(state: &PopupState) -> Self {
        let stars = state
            .credibility
            .as_ref()
            .map(|rating| star_rating(rating.score))
            .unwrap_or_else(StarRating::pending);
        let ratio = state
            .community
            .as_ref()
            .map(|rating| ratio_bar(rating.up_votes, rating.down_votes))
            .unwrap_or_else(RatioBar::pending);
        let num_ratings = state
            .community
            .as_ref()
            .map(|rating| rating.total().to_string())
            .unwrap_or_else(|| "0".to_string());

        PopupView {
            phase: state.phase,
            domain_name: state.domain_label.clone(),
            status_message: state.status.clone(),
            stars,
            ratio,
            num_ratings,
            buttons: vote_buttons(state.vote),
        }
    }

    /// Text content of one element, as a terminal would print it.
    pub fn element_text(&self, id: ElementId) -> String {
        match id {
            ElementId::DomainName => self.domain_name.clone(),
            ElementId::StatusMessage => self.status_message.clone(),
            ElementId::StarRating => with_tooltip(self.stars.glyphs(), &self.stars.tooltip),
            ElementId::UpvoteRatio => self.ratio.up_width(),
            ElementId::DownvoteRatio => self.ratio.down_width(),
            ElementId::VoteBar => self.ratio.tooltip.clone(),
            ElementId::NumRatings => self.num_ratings.clone(),
            ElementId::CredibleBtn => button_text("Credible", self.buttons.credible_active),
            ElementId::NotCredibleBtn => {
                button_text("Not credible", self.buttons.not_credible_active)
            }
        }
    }

    /// JSON object keyed by element id, for hosts that mirror the view onto
    /// real DOM nodes.
    pub fn to_elements(&self) -> Value {
        let mut elements = Map::new();
        elements.insert("phase".to_string(), json!(self.phase));
        for id in ElementId::ALL {
            elements.insert(id.as_str().to_string(), self.element_json(id));
        }
        Value::Object(elements)
    }

    fn element_json(&self, id: ElementId) -> Value {
        match id {
            ElementId::DomainName => json!({ "text": self.domain_name }),
            ElementId::StatusMessage => json!({ "text": self.status_message }),
            ElementId::StarRating => json!({
                "filled": self.stars.filled,
                "empty": self.stars.empty(),
                "title": self.stars.tooltip,
            }),
            ElementId::UpvoteRatio => json!({
                "width": self.ratio.up_width(),
                "aria-valuenow": self.ratio.up_percent,
            }),
            ElementId::DownvoteRatio => json!({
                "width": self.ratio.down_width(),
                "aria-valuenow": self.ratio.down_percent,
            }),
            ElementId::VoteBar => json!({ "title": self.ratio.tooltip }),
            ElementId::NumRatings => json!({ "text": self.num_ratings }),
            ElementId::CredibleBtn => json!({ "active": self.buttons.credible_active }),
            ElementId::NotCredibleBtn => json!({ "active": self.buttons.not_credible_active }),
        }
    }
}

fn with_tooltip(text: String, tooltip: &str) -> String {
    if tooltip.is_empty() {
        text
    } else {
        format!("{text}  ({tooltip})")
    }
}

fn button_text(label: &str, active: bool) -> String {
    if active {
        format!("[x] {label}")
    } else {
        format!("[ ] {label}")
    }
}
