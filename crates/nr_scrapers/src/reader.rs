use nr_core::{Article, Error, FrontPage, HeadlineEntry, Result, SiteConfig};

use crate::extractor::Extractor;
use crate::fetcher::Fetcher;
use crate::logging::Logger;

/// Front page and article retrieval for one site.
///
/// Holds no fetched state: each call performs its own fetch and extraction.
pub struct NewsReader<F: Fetcher> {
    fetcher: F,
    site: SiteConfig,
    extractor: Extractor,
    logger: Logger,
}

impl<F: Fetcher> NewsReader<F> {
    pub fn new(fetcher: F, site: SiteConfig) -> Result<Self> {
        site.validate()?;
        let extractor = Extractor::new(&site)?;
        let logger = Logger::new().with_prefix(site.name.clone());
        Ok(Self {
            fetcher,
            site,
            extractor,
            logger,
        })
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// Fetches the front page and pairs every headline with its link.
    pub fn load_front_page(&self) -> Result<FrontPage> {
        let url = self.site.front_page_url();
        let logger = self.logger.clone().with_prefix("front page");
        logger.debug(&format!("Fetching {}", url));

        let document = self.fetcher.fetch(&url).map_err(|e| {
            logger.error(&format!("Fetch failed: {}", e));
            e
        })?;

        let entries = self.extractor.extract_entries(&document);
        if entries.is_empty() {
            logger.warn("No headlines found, the page layout may have changed");
        } else {
            logger.info(&format!("Found {} headlines", entries.len()));
        }

        Ok(FrontPage::new(url, entries))
    }

    /// Fetches the article behind `page`'s entry at `index`.
    pub fn read_article(&self, page: &FrontPage, index: usize) -> Result<Article> {
        let entry = page.get(index).ok_or(Error::NoSuchHeadline {
            index,
            len: page.len(),
        })?;
        self.read_entry(entry)
    }

    pub fn read_entry(&self, entry: &HeadlineEntry) -> Result<Article> {
        let logger = self.logger.clone().with_prefix("article");
        logger.debug(&format!("Fetching {}", entry.link));

        let document = self.fetcher.fetch(&entry.link).map_err(|e| {
            logger.error(&format!("Fetch failed: {}", e));
            e
        })?;

        let paragraphs = self.extractor.extract_paragraphs(&document);
        if paragraphs.is_empty() {
            logger.warn(&format!("No paragraphs found at {}", entry.link));
        }
        let body = self.extractor.format_body(&entry.headline, &paragraphs);

        Ok(Article {
            headline: entry.headline.clone(),
            url: entry.link.clone(),
            paragraphs,
            body,
        })
    }
}
