use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural grouping of headlines on the front page, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Primary,
    Secondary,
    Tertiary,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Primary, Tier::Secondary, Tier::Tertiary];

    pub fn name(&self) -> &'static str {
        match self {
            Tier::Primary => "primary",
            Tier::Secondary => "secondary",
            Tier::Tertiary => "tertiary",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A headline together with the absolute link to its article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadlineEntry {
    pub tier: Tier,
    pub headline: String,
    pub link: String,
}

/// Snapshot of one front-page fetch. Rebuilt from scratch on every fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontPage {
    pub url: String,
    pub fetched_at: DateTime<Utc>,
    entries: Vec<HeadlineEntry>,
}

impl FrontPage {
    pub fn new(url: impl Into<String>, entries: Vec<HeadlineEntry>) -> Self {
        Self {
            url: url.into(),
            fetched_at: Utc::now(),
            entries,
        }
    }

    pub fn get(&self, index: usize) -> Option<&HeadlineEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeadlineEntry> {
        self.entries.iter()
    }

    pub fn headlines(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.headline.as_str()).collect()
    }

    pub fn links(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.link.as_str()).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub headline: String,
    pub url: String,
    /// Flattened text of each body paragraph, unwrapped.
    pub paragraphs: Vec<String>,
    /// Headline line followed by the wrapped paragraphs.
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(tier: Tier, headline: &str, link: &str) -> HeadlineEntry {
        HeadlineEntry {
            tier,
            headline: headline.to_string(),
            link: link.to_string(),
        }
    }

    #[test]
    fn test_tier_order() {
        assert!(Tier::Primary < Tier::Secondary);
        assert!(Tier::Secondary < Tier::Tertiary);
        assert_eq!(Tier::ALL.map(|t| t.name()), ["primary", "secondary", "tertiary"]);
    }

    #[test]
    fn test_front_page_projections_stay_aligned() {
        let page = FrontPage::new(
            "https://www.example.com/news",
            vec![
                entry(Tier::Primary, "Main story", "https://www.example.com/a"),
                entry(Tier::Secondary, "Second", "https://www.example.com/b"),
                entry(Tier::Tertiary, "Third", "https://www.example.com/c"),
            ],
        );

        assert_eq!(page.len(), 3);
        assert_eq!(page.headlines(), vec!["Main story", "Second", "Third"]);
        assert_eq!(
            page.links(),
            vec![
                "https://www.example.com/a",
                "https://www.example.com/b",
                "https://www.example.com/c"
            ]
        );
        for (i, e) in page.iter().enumerate() {
            assert_eq!(page.headlines()[i], e.headline);
            assert_eq!(page.links()[i], e.link);
        }
        assert_eq!(page.get(1).unwrap().tier, Tier::Secondary);
        assert!(page.get(3).is_none());
    }

    #[test]
    fn test_front_page_serializes_tier_lowercase() {
        let page = FrontPage::new("u", vec![entry(Tier::Tertiary, "h", "l")]);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["entries"][0]["tier"], "tertiary");
    }
}
