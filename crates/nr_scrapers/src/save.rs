use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use nr_core::{Article, Result};
use tracing::info;

/// `<YYYYMMDD>-<headline>.txt`, with quotes removed from the headline and
/// path separators replaced so the name stays inside the target directory.
pub fn article_filename(date: NaiveDate, headline: &str) -> String {
    let name: String = headline
        .chars()
        .filter(|c| !matches!(c, '\'' | '"'))
        .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
        .collect();
    format!("{}-{}.txt", date.format("%Y%m%d"), name)
}

/// Appends the article to its dated file in `dir`, creating the file if needed.
pub fn save_article(dir: impl AsRef<Path>, date: NaiveDate, article: &Article) -> Result<PathBuf> {
    let path = dir.as_ref().join(article_filename(date, &article.headline));

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    writeln!(file, "Date saved: {}", date.format("%Y-%m-%d"))?;
    file.write_all(article.body.as_bytes())?;

    info!("Saved article to {}", path.display());
    Ok(path)
}
