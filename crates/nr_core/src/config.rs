use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

use crate::types::Tier;
use crate::{Error, Result};

pub const DEFAULT_WRAP_WIDTH: usize = 80;

/// Container selector for one tier of front-page headlines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSelector {
    pub tier: Tier,
    pub container: String,
}

/// Structural queries describing one site's markup.
///
/// Title and link selectors are evaluated inside each tier container, the
/// body selector names the element holding an article's paragraphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    pub origin: String,
    pub front_page_path: String,
    pub tiers: Vec<TierSelector>,
    pub title_selector: String,
    pub link_selector: String,
    pub body_selector: String,
    #[serde(default = "default_wrap_width")]
    pub wrap_width: usize,
}

fn default_wrap_width() -> usize {
    DEFAULT_WRAP_WIDTH
}

impl SiteConfig {
    /// BBC News world page. Buzzard is the lead story, pigeon the second tier
    /// and macaw the third.
    pub fn bbc_world() -> Self {
        Self {
            name: "BBC News".to_string(),
            origin: "https://www.bbc.co.uk".to_string(),
            front_page_path: "/news/world".to_string(),
            tiers: vec![
                TierSelector {
                    tier: Tier::Primary,
                    container: r#"div[class="buzzard-item"]"#.to_string(),
                },
                TierSelector {
                    tier: Tier::Secondary,
                    container: r#"div[class="pigeon"]"#.to_string(),
                },
                TierSelector {
                    tier: Tier::Tertiary,
                    container: r#"div[class="macaw"]"#.to_string(),
                },
            ],
            title_selector: r#"span[class="title-link__title-text"]"#.to_string(),
            link_selector: r#"a[class="title-link"]"#.to_string(),
            body_selector: r#"div[class="story-body__inner"]"#.to_string(),
            wrap_width: DEFAULT_WRAP_WIDTH,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SiteConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!("Loaded site config from {}", path.as_ref().display());
        Self::from_json_str(&json)
    }

    pub fn with_wrap_width(mut self, width: usize) -> Self {
        self.wrap_width = width;
        self
    }

    pub fn front_page_url(&self) -> String {
        format!("{}{}", self.origin, self.front_page_path)
    }

    pub fn validate(&self) -> Result<()> {
        let origin = Url::parse(&self.origin)
            .map_err(|e| Error::Config(format!("Invalid origin '{}': {}", self.origin, e)))?;
        if !matches!(origin.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "Origin must be http or https, got '{}'",
                origin.scheme()
            )));
        }

        if self.wrap_width == 0 {
            return Err(Error::Config("Wrap width must be greater than zero".to_string()));
        }

        let tiers: Vec<Tier> = self.tiers.iter().map(|t| t.tier).collect();
        if tiers != Tier::ALL {
            return Err(Error::Config(format!(
                "Expected one container per tier in order primary, secondary, tertiary; got {:?}",
                tiers
            )));
        }

        let selectors = self
            .tiers
            .iter()
            .map(|t| ("tier container", &t.container))
            .chain([
                ("title selector", &self.title_selector),
                ("link selector", &self.link_selector),
                ("body selector", &self.body_selector),
            ]);
        for (what, selector) in selectors {
            if selector.trim().is_empty() {
                return Err(Error::Config(format!("Empty {}", what)));
            }
        }

        Ok(())
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::bbc_world()
    }
}
