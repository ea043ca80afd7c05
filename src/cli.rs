use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "credicheck",
    about = "Credibility ratings and community votes for the site you are on",
    version = env!("CARGO_PKG_VERSION"),
)]
pub struct Cli {
    /// Directory holding .credicheck/settings.json
    #[arg(long, env = "CREDICHECK_HOME", global = true)]
    pub config_root: Option<String>,

    /// API origin override for this run
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format override for this run
    #[arg(short, long, global = true)]
    pub output: Option<OutputArg>,

    /// Log level override (takes precedence over RUST_LOG and settings)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    /// Changed elements as `[id] text` lines
    Text,
    /// One JSON object per frame, keyed by element id
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    /// Credible
    Up,
    /// Not credible
    Down,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the popup and read button clicks (c, n, r, q) from stdin
    Open {
        /// Page URL; falls back to $CREDICHECK_TAB_URL
        url: Option<String>,
    },
    /// Load the popup once and exit
    Show {
        /// Page URL; falls back to $CREDICHECK_TAB_URL
        url: Option<String>,
    },
    /// Load the popup for URL, then press a vote button
    Vote { url: String, direction: Direction },
    /// Delete your vote on URL
    Remove { url: String },
    /// List every vote you have cast
    MyVotes,
    /// Inspect or change persisted settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Print the effective settings file
    Show,
    /// Persist KEY=VALUE (e.g. baseUrl=http://127.0.0.1:8000)
    Set { assignment: String },
}
