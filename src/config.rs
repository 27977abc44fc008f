use crate::error::ScrapeError;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Browser driven through WebDriver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    Firefox,
    Chrome,
}

impl std::str::FromStr for Browser {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "firefox" => Ok(Browser::Firefox),
            "chrome" => Ok(Browser::Chrome),
            other => Err(ScrapeError::Config(format!("unknown browser {other:?}"))),
        }
    }
}

/// Settings for opening a browser session
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Run the browser without a window
    #[serde(default = "default_headless")]
    pub headless: bool,

    #[serde(default = "default_browser")]
    pub browser: Browser,
}

/// Configuration for a scraping run
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Page holding the leaderboard table
    #[serde(default = "default_leaderboard_url")]
    pub leaderboard_url: String,

    #[serde(default)]
    pub session: SessionConfig,
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_headless() -> bool {
    true
}

fn default_browser() -> Browser {
    Browser::Firefox
}

/// Default value for leaderboard_url
fn default_leaderboard_url() -> String {
    "https://pewpew.live/era2".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            headless: default_headless(),
            browser: default_browser(),
        }
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            leaderboard_url: default_leaderboard_url(),
            session: SessionConfig::default(),
        }
    }
}

impl ScraperConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScrapeError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ScrapeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds the configuration from the process environment
    ///
    /// `PEWPEW_CONFIG` names an optional JSON file; `WEBDRIVER_URL`,
    /// `PEWPEW_LEADERBOARD_URL`, `PEWPEW_HEADLESS` and `PEWPEW_BROWSER`
    /// override single values on top of it.
    pub fn from_env() -> Result<Self, ScrapeError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ScrapeError> {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let mut config = match var("PEWPEW_CONFIG") {
            Some(path) => {
                ::log::info!("Loading configuration from {}", path);
                Self::from_file(path)?
            }
            None => Self::default(),
        };

        if let Some(url) = var("WEBDRIVER_URL") {
            config.session.webdriver_url = url;
        }
        if let Some(url) = var("PEWPEW_LEADERBOARD_URL") {
            config.leaderboard_url = url;
        }
        if let Some(headless) = var("PEWPEW_HEADLESS") {
            config.session.headless = headless.parse().map_err(|_| {
                ScrapeError::Config(format!("PEWPEW_HEADLESS must be true or false, got {headless:?}"))
            })?;
        }
        if let Some(browser) = var("PEWPEW_BROWSER") {
            config.session.browser = browser.parse()?;
        }

        Ok(config)
    }
}
