use crate::config::{Browser, SessionConfig};
use crate::error::ScrapeError;
use crate::page::PageElement;
use fantoccini::{Client, ClientBuilder};
use serde_json::json;

/// Something that can load a page and hand back its element tree
#[allow(async_fn_in_trait)]
pub trait PageSource {
    /// Navigates to `url` and returns the root element of the rendered page
    async fn open(&mut self, url: &str) -> Result<PageElement, ScrapeError>;
}

/// A browser session driven over WebDriver
///
/// The session must be released with [`WebDriverSession::close`] once the
/// caller is done with it, on success and on error alike.
pub struct WebDriverSession {
    client: Client,
}

impl WebDriverSession {
    /// Connects to the WebDriver instance and starts a browser session
    pub async fn connect(config: &SessionConfig) -> Result<Self, ScrapeError> {
        let mut builder = ClientBuilder::native();
        builder.capabilities(capabilities(config));

        match builder.connect(&config.webdriver_url).await {
            Ok(client) => {
                ::log::debug!(
                    "Connected to WebDriver at {} ({:?}, headless: {})",
                    config.webdriver_url,
                    config.browser,
                    config.headless
                );
                Ok(Self { client })
            }
            Err(e) => {
                ::log::error!(
                    "Failed to connect to WebDriver at {}: {}",
                    config.webdriver_url,
                    e
                );
                ::log::error!(
                    "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
                );
                Err(e.into())
            }
        }
    }

    /// Ends the browser session
    pub async fn close(self) -> Result<(), ScrapeError> {
        self.client.close().await?;
        ::log::debug!("WebDriver session closed");
        Ok(())
    }
}

impl PageSource for WebDriverSession {
    async fn open(&mut self, url: &str) -> Result<PageElement, ScrapeError> {
        let start = std::time::Instant::now();
        ::log::debug!("Opening {}", url);

        if let Err(e) = self.client.goto(url).await {
            return Err(navigation_error(e, "accessing", url));
        }
        let html = match self.client.source().await {
            Ok(source) => source,
            Err(e) => return Err(navigation_error(e, "getting source for", url)),
        };

        let page = PageElement::parse_document(&html);
        ::log::debug!(
            "Loaded {} in {:.2} seconds",
            url,
            start.elapsed().as_secs_f64()
        );
        Ok(page)
    }
}

/// Browser-specific capabilities selecting headless mode
fn capabilities(config: &SessionConfig) -> serde_json::Map<String, serde_json::Value> {
    let mut caps = serde_json::Map::new();
    if !config.headless {
        return caps;
    }

    match config.browser {
        Browser::Firefox => {
            caps.insert("moz:firefoxOptions".to_string(), json!({ "args": ["-headless"] }));
        }
        Browser::Chrome => {
            caps.insert("goog:chromeOptions".to_string(), json!({ "args": ["--headless"] }));
        }
    }
    caps
}

fn navigation_error(error: fantoccini::error::CmdError, context: &str, url: &str) -> ScrapeError {
    if error.to_string().contains("Unable to find session") {
        ::log::warn!("Lost session while {} {}", context, url);
    } else {
        ::log::error!("Failed {} {}: {}", context, url, error);
    }
    error.into()
}
