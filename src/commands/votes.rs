use crate::client::CredibilityApi;
use crate::error::PopupError;
use crate::models::rating::{UserVote, Vote};
use log::{error, info};

/// Every vote the caller has cast, in server order.
pub async fn list_my_votes<A>(api: &A) -> Result<Vec<UserVote>, PopupError>
where
    A: CredibilityApi + ?Sized,
{
    api.get_user_votes().await.map_err(|e| {
        error!("Error listing votes: {e} ({})", e.detail());
        PopupError::from(e)
    })
}

/// Clears the caller's vote on `site` through the DELETE endpoint.
pub async fn remove_vote<A>(api: &A, site: &str) -> Result<bool, PopupError>
where
    A: CredibilityApi + ?Sized,
{
    let site = site.trim();
    if site.is_empty() {
        return Err(PopupError::NoActiveSite);
    }
    let removed = api.remove_user_vote(site).await.map_err(|e| {
        error!("Error removing vote: {e} ({})", e.detail());
        PopupError::from(e)
    })?;
    info!("vote removed for {site}");
    Ok(removed)
}

pub fn format_vote_table(votes: &[UserVote]) -> String {
    if votes.is_empty() {
        return "No votes cast yet.".to_string();
    }

    let width = votes.iter().map(|v| v.site.len()).max().unwrap_or(0).max(4);
    let mut out = format!("{:<width$}  VOTE\n", "SITE");
    for vote in votes {
        let label = match vote.value {
            Vote::Up => "credible",
            Vote::Down => "not credible",
            Vote::None => "none",
        };
        out.push_str(&format!("{:<width$}  {label}\n", vote.site));
    }
    out
}
