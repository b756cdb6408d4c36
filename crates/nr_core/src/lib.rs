pub mod config;
pub mod error;
pub mod types;

pub use config::{SiteConfig, TierSelector, DEFAULT_WRAP_WIDTH};
pub use error::{Error, Result};
pub use types::{Article, FrontPage, HeadlineEntry, Tier};
