use thiserror::Error;

/// Errors raised while fetching or extracting leaderboard data
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// A required element was not present on the page
    #[error("no element matching {query}")]
    ElementNotFound { query: String },

    /// A leaderboard row did not have the expected number of cells
    #[error("row {row} has {actual} cells, expected {expected}")]
    MalformedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A cell that should hold a number held something else
    #[error("row {row}: cannot parse {field} from {text:?}")]
    InvalidNumber {
        row: usize,
        field: &'static str,
        text: String,
    },

    /// The profile discriminator was not of the form `#<digits>`
    #[error("invalid discriminator {text:?}")]
    InvalidDiscriminator { text: String },

    /// Invalid configuration value
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("webdriver command failed: {0}")]
    WebDriver(#[from] fantoccini::error::CmdError),

    #[error("failed to start webdriver session: {0}")]
    NewSession(#[from] fantoccini::error::NewSessionError),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ScrapeError {
    pub(crate) fn not_found(query: impl ToString) -> Self {
        ScrapeError::ElementNotFound {
            query: query.to_string(),
        }
    }
}
