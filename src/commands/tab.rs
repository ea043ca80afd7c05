use async_trait::async_trait;

pub const TAB_URL_ENV: &str = "CREDICHECK_TAB_URL";

/// Whatever tells the popup which page the user is looking at.
#[async_trait]
pub trait TabSource: Send + Sync {
    async fn active_tab_url(&self) -> Result<String, String>;
}

/// A URL supplied up front, e.g. on the command line.
#[derive(Debug, Clone)]
pub struct FixedTab(pub String);

#[async_trait]
impl TabSource for FixedTab {
    async fn active_tab_url(&self) -> Result<String, String> {
        non_empty(&self.0).ok_or_else(|| "NO_TAB: empty tab URL".to_string())
    }
}

/// Reads the URL from an environment variable at resolution time.
#[derive(Debug, Clone)]
pub struct EnvTab {
    pub var: String,
}

impl Default for EnvTab {
    fn default() -> Self {
        EnvTab {
            var: TAB_URL_ENV.to_string(),
        }
    }
}

#[async_trait]
impl TabSource for EnvTab {
    async fn active_tab_url(&self) -> Result<String, String> {
        let raw = std::env::var(&self.var).map_err(|e| format!("NO_TAB: {}: {e}", self.var))?;
        non_empty(&raw).ok_or_else(|| format!("NO_TAB: {} is empty", self.var))
    }
}

/// Tries each source in order; the first URL wins.
#[derive(Default)]
pub struct TabChain {
    sources: Vec<Box<dyn TabSource>>,
}

impl TabChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source: impl TabSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }
}

#[async_trait]
impl TabSource for TabChain {
    async fn active_tab_url(&self) -> Result<String, String> {
        let mut failures = Vec::new();
        for source in &self.sources {
            match source.active_tab_url().await {
                Ok(url) => return Ok(url),
                Err(e) => failures.push(e),
            }
        }
        if failures.is_empty() {
            return Err("NO_TAB: no tab source configured".to_string());
        }
        Err(failures.join("; "))
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
