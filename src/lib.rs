pub mod config;
pub mod error;
pub mod extract;
pub mod page;
pub mod records;
pub mod scrape;
pub mod session;

// Re-export commonly used types for convenience
pub use config::{ScraperConfig, SessionConfig};
pub use error::ScrapeError;
pub use page::{PageElement, Query};
pub use records::{MedalRecord, PlayerProfile, PlayerRecord};
pub use session::{PageSource, WebDriverSession};
