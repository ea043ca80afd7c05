pub mod http;

use crate::error::ApiError;
use crate::models::rating::{CommunityRating, CredibilityRating, UserVote, Vote};
use async_trait::async_trait;
use std::fmt;

pub use http::{HttpApiClient, DEFAULT_BASE_URL};

/// The remote credibility service as seen by the popup.
#[async_trait]
pub trait CredibilityApi: Send + Sync {
    async fn get_credibility_rating(&self, site: &str) -> Result<CredibilityRating, ApiError>;

    async fn get_community_rating(&self, site: &str) -> Result<CommunityRating, ApiError>;

    /// A vote of `Vote::None` clears any existing vote.
    async fn cast_user_vote(&self, site: &str, vote: Vote) -> Result<bool, ApiError>;

    async fn remove_user_vote(&self, site: &str) -> Result<bool, ApiError>;

    async fn get_user_votes(&self) -> Result<Vec<UserVote>, ApiError>;

    async fn get_user_vote_for(&self, site: &str) -> Result<Vote, ApiError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GetCredibilityRating,
    GetCommunityRating,
    CastUserVote,
    RemoveUserVote,
    GetUserVotes,
    GetUserVoteFor,
}

impl Operation {
    pub fn summary(self) -> &'static str {
        match self {
            Operation::GetCredibilityRating => "Get Credibility Rating",
            Operation::GetCommunityRating => "Get Community Rating",
            Operation::CastUserVote => "Cast User Vote",
            Operation::RemoveUserVote => "Remove User Vote",
            Operation::GetUserVotes => "Get User Votes",
            Operation::GetUserVoteFor => "Get User Vote",
        }
    }

    pub fn endpoint(self) -> &'static str {
        match self {
            Operation::GetCredibilityRating => "/score",
            Operation::GetCommunityRating | Operation::CastUserVote | Operation::RemoveUserVote => {
                "/ratings"
            }
            Operation::GetUserVotes => "/ratings/my/all",
            Operation::GetUserVoteFor => "/ratings/my",
        }
    }

    pub fn method(self) -> reqwest::Method {
        match self {
            Operation::CastUserVote => reqwest::Method::PUT,
            Operation::RemoveUserVote => reqwest::Method::DELETE,
            _ => reqwest::Method::GET,
        }
    }

    /// Writes declare JSON content type and acceptance; reads go out bare.
    pub fn sends_json_headers(self) -> bool {
        matches!(self, Operation::CastUserVote | Operation::RemoveUserVote)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.summary())
    }
}
