use serde::{Deserialize, Serialize};

/// How `GET /ratings/my` encodes the caller's vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteWireFormat {
    /// Accept either shape.
    #[default]
    Auto,
    /// A bare integer, e.g. `1`.
    Bare,
    /// An object carrying a `value` field, e.g. `{"site": "...", "value": 1}`.
    Wrapped,
}

impl VoteWireFormat {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "auto" => Some(Self::Auto),
            "bare" => Some(Self::Bare),
            "wrapped" => Some(Self::Wrapped),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Settings after migration and sanitization, ready to wire up a client.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveSettings {
    pub base_url: String,
    pub vote_wire_format: VoteWireFormat,
    pub output_format: OutputFormat,
    pub log_level: String,
    pub timeout_secs: u64, // 0 leaves the transport default in place
}
