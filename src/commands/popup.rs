use crate::client::CredibilityApi;
use crate::commands::tab::TabSource;
use crate::error::{ApiError, PopupError};
use crate::models::popup::{Phase, PopupState, StatePatch};
use crate::models::rating::Vote;
use crate::view::PopupView;
use log::{error, info};

pub const NO_TAB_LABEL: &str = "Error: Cannot access current tab";
pub const NO_TAB_STATUS: &str = "Please refresh and try again.";
pub const LOAD_FAILED_STATUS: &str = "Error loading data. Please try again.";
pub const NO_URL_STATUS: &str = "Error: No URL available. Please refresh.";
pub const SUBMITTING_STATUS: &str = "Submitting vote...";
pub const VOTE_REMOVED_STATUS: &str = "Vote removed successfully!";
pub const VOTE_SUBMITTED_STATUS: &str = "Vote submitted successfully!";
pub const VOTE_FAILED_STATUS: &str = "Error submitting vote. Please try again.";

/// Where frames go. Closures taking a view work too.
pub trait PopupSurface {
    fn render(&mut self, view: &PopupView);
}

impl<F> PopupSurface for F
where
    F: FnMut(&PopupView),
{
    fn render(&mut self, view: &PopupView) {
        self(view)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteButton {
    Credible,
    NotCredible,
}

impl VoteButton {
    pub fn vote(self) -> Vote {
        match self {
            VoteButton::Credible => Vote::Up,
            VoteButton::NotCredible => Vote::Down,
        }
    }
}

/// The reads performed on every load, in order. Each one completes and is
/// rendered before the next starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Read {
    Credibility,
    Community,
    OwnVote,
}

const READ_SEQUENCE: [Read; 3] = [Read::Credibility, Read::Community, Read::OwnVote];

/// Drives one popup instance. Owns the only mutable copy of the UI state;
/// every change goes through `apply` and is followed by exactly one render.
pub struct PopupController<A, S> {
    api: A,
    surface: S,
    state: PopupState,
}

impl<A, S> PopupController<A, S>
where
    A: CredibilityApi,
    S: PopupSurface,
{
    pub fn new(api: A, surface: S) -> Self {
        Self {
            api,
            surface,
            state: PopupState::default(),
        }
    }

    pub fn state(&self) -> &PopupState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Resolves the active tab and loads it. Nothing touches the network if
    /// no tab URL can be obtained.
    pub async fn open<T>(&mut self, tabs: &T) -> Result<(), PopupError>
    where
        T: TabSource + ?Sized,
    {
        match tabs.active_tab_url().await {
            Ok(url) => self.load(&url).await,
            Err(e) => {
                error!("Error getting current tab: {e}");
                self.apply_all([
                    StatePatch::Phase(Phase::NoTab),
                    StatePatch::DomainLabel(NO_TAB_LABEL.to_string()),
                    StatePatch::Status(NO_TAB_STATUS.to_string()),
                ]);
                Err(PopupError::TabResolutionFailed)
            }
        }
    }

    /// Reloads the current site.
    pub async fn refresh(&mut self) -> Result<(), PopupError> {
        let Some(url) = self.state.site.clone() else {
            self.apply(StatePatch::Status(NO_URL_STATUS.to_string()));
            return Err(PopupError::NoActiveSite);
        };
        self.load(&url).await
    }

    pub async fn load(&mut self, url: &str) -> Result<(), PopupError> {
        info!("loading ratings for {url}");
        self.apply_all([
            StatePatch::Phase(Phase::Loading),
            StatePatch::Site {
                url: url.to_string(),
                domain_label: domain_label(url),
            },
            StatePatch::Status(String::new()),
        ]);

        for read in READ_SEQUENCE {
            let fetched = self.fetch(read, url).await;
            match fetched {
                Ok(patch) => self.apply(patch),
                Err(e) => {
                    error!("Error fetching data: {e} ({})", e.detail());
                    self.apply_all([
                        StatePatch::Phase(Phase::FetchFailed),
                        StatePatch::Status(LOAD_FAILED_STATUS.to_string()),
                    ]);
                    return Err(e.into());
                }
            }
        }

        self.apply(StatePatch::Phase(Phase::Ready));
        Ok(())
    }

    pub async fn click(&mut self, button: VoteButton) -> Result<Vote, PopupError> {
        self.handle_vote(button.vote()).await
    }

    /// Submits `clicked`, or withdraws the vote if `clicked` is already the
    /// stored one, then reloads everything. Returns the submitted vote.
    pub async fn handle_vote(&mut self, clicked: Vote) -> Result<Vote, PopupError> {
        let Some(url) = self.state.site.clone() else {
            self.apply(StatePatch::Status(NO_URL_STATUS.to_string()));
            return Err(PopupError::NoActiveSite);
        };

        let submitted = self.state.vote.toggled(clicked);
        let resume_phase = self.state.phase;
        self.apply_all([
            StatePatch::Phase(Phase::Voting),
            StatePatch::Status(SUBMITTING_STATUS.to_string()),
        ]);

        let cast = self.api.cast_user_vote(&url, submitted).await;
        if let Err(e) = cast {
            error!("Error casting vote: {e} ({})", e.detail());
            self.apply_all([
                StatePatch::Phase(resume_phase),
                StatePatch::Status(VOTE_FAILED_STATUS.to_string()),
            ]);
            return Err(e.into());
        }

        let status = if submitted == Vote::None {
            VOTE_REMOVED_STATUS
        } else {
            VOTE_SUBMITTED_STATUS
        };
        info!("vote {submitted} recorded for {url}");
        self.apply(StatePatch::Status(status.to_string()));

        self.load(&url).await?;
        Ok(submitted)
    }

    async fn fetch(&self, read: Read, url: &str) -> Result<StatePatch, ApiError> {
        Ok(match read {
            Read::Credibility => StatePatch::Credibility(self.api.get_credibility_rating(url).await?),
            Read::Community => StatePatch::Community(self.api.get_community_rating(url).await?),
            Read::OwnVote => StatePatch::Vote(self.api.get_user_vote_for(url).await?),
        })
    }

    fn apply(&mut self, patch: StatePatch) {
        self.apply_all([patch]);
    }

    fn apply_all<I>(&mut self, patches: I)
    where
        I: IntoIterator<Item = StatePatch>,
    {
        for patch in patches {
            self.state.apply(patch);
        }
        self.surface.render(&PopupView::from_state(&self.state));
    }
}

/// Host part of the URL, or the raw string when it is not a URL.
pub fn domain_label(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}
