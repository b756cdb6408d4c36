pub mod extractor;
pub mod fetcher;
pub mod logging;
pub mod reader;
pub mod save;
pub mod text;

pub use extractor::{build_link, Extractor};
pub use fetcher::{parse_document, Fetcher, HttpFetcher, StaticFetcher};
pub use logging::{init_logging, Logger};
pub use reader::NewsReader;
pub use save::{article_filename, save_article};
pub use text::TextWrapper;
