use crate::models::rating::{CommunityRating, CredibilityRating, Vote};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Init,
    Loading,
    Ready,
    Voting,
    NoTab,
    FetchFailed,
}

/// Snapshot of everything the popup shows. `None` for a rating means the
/// read has not completed yet, which is distinct from an unscored site.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PopupState {
    pub phase: Phase,
    pub site: Option<String>,
    pub domain_label: String,
    pub status: String,
    pub credibility: Option<CredibilityRating>,
    pub community: Option<CommunityRating>,
    pub vote: Vote,
}

/// A single change to the snapshot, produced by one step of the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum StatePatch {
    Phase(Phase),
    Site { url: String, domain_label: String },
    DomainLabel(String),
    Status(String),
    Credibility(CredibilityRating),
    Community(CommunityRating),
    Vote(Vote),
}

impl PopupState {
    pub fn apply(&mut self, patch: StatePatch) {
        match patch {
            StatePatch::Phase(phase) => self.phase = phase,
            StatePatch::Site { url, domain_label } => {
                self.site = Some(url);
                self.domain_label = domain_label;
            }
            StatePatch::DomainLabel(label) => self.domain_label = label,
            StatePatch::Status(status) => self.status = status,
            StatePatch::Credibility(rating) => self.credibility = Some(rating),
            StatePatch::Community(rating) => self.community = Some(rating),
            StatePatch::Vote(vote) => self.vote = vote,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patches_leave_unrelated_fields_alone() {
        let mut state = PopupState::default();
        state.apply(StatePatch::Site {
            url: "https://example.com/a".to_string(),
            domain_label: "example.com".to_string(),
        });
        state.apply(StatePatch::Vote(Vote::Down));
        state.apply(StatePatch::Status("hello".to_string()));

        assert_eq!(state.site.as_deref(), Some("https://example.com/a"));
        assert_eq!(state.vote, Vote::Down);
        assert_eq!(state.phase, Phase::Init);
        assert!(state.credibility.is_none());
    }
}
