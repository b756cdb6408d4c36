use nr_core::{Error, HeadlineEntry, Result, SiteConfig, Tier};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::text::TextWrapper;

const PARAGRAPH_SELECTOR: &str = "p";

#[derive(Debug, Clone)]
struct TierQuery {
    tier: Tier,
    container: Selector,
}

/// Structural queries compiled from a [`SiteConfig`].
///
/// Sub-selectors are always evaluated inside the elements matched by their
/// container, so selector lists in either part keep their meaning. Every
/// query fails open: a container or sub-selector that matches nothing yields
/// an empty result, never an error.
#[derive(Debug, Clone)]
pub struct Extractor {
    origin: String,
    tiers: Vec<TierQuery>,
    title: Selector,
    link: Selector,
    body: Selector,
    paragraph: Selector,
    wrapper: TextWrapper,
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| Error::InvalidSelector(format!("'{}': {}", selector, e)))
}

/// Turns a relative path from the page into an absolute URL.
///
/// Plain concatenation: no slash collapsing, no normalisation.
pub fn build_link(origin: &str, path: &str) -> String {
    format!("{}{}", origin, path)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

impl Extractor {
    pub fn new(site: &SiteConfig) -> Result<Self> {
        let tiers = site
            .tiers
            .iter()
            .map(|t| -> Result<TierQuery> {
                Ok(TierQuery {
                    tier: t.tier,
                    container: compile(&t.container)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            origin: site.origin.clone(),
            tiers,
            title: compile(&site.title_selector)?,
            link: compile(&site.link_selector)?,
            body: compile(&site.body_selector)?,
            paragraph: compile(PARAGRAPH_SELECTOR)?,
            wrapper: TextWrapper::new(site.wrap_width),
        })
    }

    /// Headline text for every tier, primary first, each tier in document order.
    pub fn extract_headlines(&self, document: &Html) -> Vec<String> {
        let mut headlines = Vec::new();
        for query in &self.tiers {
            let found: Vec<String> = document
                .select(&query.container)
                .flat_map(|container| container.select(&self.title))
                .map(element_text)
                .collect();
            if found.is_empty() {
                debug!("No {} headlines on page", query.tier);
            }
            headlines.extend(found);
        }
        headlines
    }

    /// Absolute article links, positionally aligned with [`Self::extract_headlines`].
    pub fn extract_links(&self, document: &Html) -> Vec<String> {
        let mut links = Vec::new();
        for query in &self.tiers {
            let found: Vec<String> = document
                .select(&query.container)
                .flat_map(|container| container.select(&self.link))
                .filter_map(|a| a.value().attr("href"))
                .map(|href| build_link(&self.origin, href))
                .collect();
            if found.is_empty() {
                debug!("No {} links on page", query.tier);
            }
            links.extend(found);
        }
        links
    }

    /// Headlines paired with their links, container by container.
    ///
    /// Titles and links are matched inside the same tier container, so a
    /// container missing one side drops out instead of shifting every later
    /// pair by one.
    pub fn extract_entries(&self, document: &Html) -> Vec<HeadlineEntry> {
        let mut entries = Vec::new();

        for query in &self.tiers {
            let before = entries.len();

            for container in document.select(&query.container) {
                let titles: Vec<String> = container.select(&self.title).map(element_text).collect();
                let links: Vec<String> = container
                    .select(&self.link)
                    .filter_map(|a| a.value().attr("href"))
                    .map(|href| build_link(&self.origin, href))
                    .collect();

                if titles.len() != links.len() {
                    warn!(
                        "{} container has {} headlines but {} links, keeping {}",
                        query.tier,
                        titles.len(),
                        links.len(),
                        titles.len().min(links.len())
                    );
                }

                entries.extend(titles.into_iter().zip(links).map(|(headline, link)| {
                    HeadlineEntry {
                        tier: query.tier,
                        headline,
                        link,
                    }
                }));
            }

            debug!("{} tier: {} entries", query.tier, entries.len() - before);
        }

        entries
    }

    /// Flattened text of every paragraph in the article body, in document order.
    pub fn extract_paragraphs(&self, document: &Html) -> Vec<String> {
        document
            .select(&self.body)
            .flat_map(|body| body.select(&self.paragraph))
            .map(element_text)
            .collect()
    }

    /// Headline line followed by each paragraph wrapped to the configured
    /// width, every paragraph terminated by a blank line. A paragraph with no
    /// text still contributes its blank line.
    pub fn extract_body(&self, document: &Html, headline: &str) -> String {
        self.format_body(headline, &self.extract_paragraphs(document))
    }

    pub fn format_body(&self, headline: &str, paragraphs: &[String]) -> String {
        let mut body = format!("{}\n", headline);
        for paragraph in paragraphs {
            let lines = self.wrapper.wrap(paragraph);
            if !lines.is_empty() {
                body.push_str(&lines.join("\n"));
                body.push('\n');
            }
            body.push('\n');
        }
        body
    }
}
