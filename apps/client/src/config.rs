//! Client configuration.

/// Store address used when nothing else is configured.
pub const DEFAULT_STORE_URL: &str = "http://localhost:3002";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub store_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            store_url: DEFAULT_STORE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Load `.env` if present and read `FLASHCARDS_URL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::resolve(None, std::env::var("FLASHCARDS_URL").ok())
    }

    /// An explicit URL wins over the environment, which wins over the default.
    pub fn resolve(explicit: Option<String>, env: Option<String>) -> Self {
        let store_url = explicit
            .or(env)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STORE_URL.to_string());
        Self { store_url }
    }

    pub fn with_url(self, url: Option<String>) -> Self {
        match url {
            Some(url) => Self::resolve(Some(url), None),
            None => self,
        }
    }
}
