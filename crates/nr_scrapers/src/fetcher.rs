use std::collections::HashMap;

use nr_core::{Error, Result};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use scraper::Html;
use tracing::debug;

const USER_AGENT: &str = concat!("newsreel/", env!("CARGO_PKG_VERSION"));

/// Source of parsed pages.
pub trait Fetcher {
    /// Fetches `url` and parses the response into a document tree.
    fn fetch(&self, url: &str) -> Result<Html>;
}

/// Blocking HTTP fetcher. One GET per call, transport defaults otherwise.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Html> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::network(url, e))?;

        check_status(url, response.status())?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        check_content_type(url, content_type.as_deref())?;

        // Decodes using the declared charset, UTF-8 when none is given.
        let body = response.text().map_err(|e| Error::network(url, e))?;
        debug!("Fetched {} bytes from {}", body.len(), url);

        parse_document(&body)
    }
}

pub(crate) fn check_status(url: &str, status: StatusCode) -> Result<()> {
    if status.is_success() {
        Ok(())
    } else {
        Err(Error::network(url, format!("HTTP {}", status)))
    }
}

/// A missing content type is accepted; a declared one must be some flavour of
/// HTML or XML.
pub(crate) fn check_content_type(url: &str, content_type: Option<&str>) -> Result<()> {
    match content_type {
        None => Ok(()),
        Some(ct) => {
            let ct = ct.to_ascii_lowercase();
            if ct.contains("html") || ct.contains("xml") {
                Ok(())
            } else {
                Err(Error::Parse(format!(
                    "Unexpected content type '{}' from {}",
                    ct, url
                )))
            }
        }
    }
}

pub fn parse_document(body: &str) -> Result<Html> {
    if body.trim().is_empty() {
        return Err(Error::Parse("Empty document".to_string()));
    }
    Ok(Html::parse_document(body))
}

#[derive(Debug, Clone)]
enum Page {
    Markup(String),
    Status(StatusCode),
}

/// Serves canned pages from memory. Unknown URLs answer 404.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, Page>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, markup: impl Into<String>) -> Self {
        self.pages.insert(url.into(), Page::Markup(markup.into()));
        self
    }

    pub fn with_status(mut self, url: impl Into<String>, status: StatusCode) -> Self {
        self.pages.insert(url.into(), Page::Status(status));
        self
    }
}

impl Fetcher for StaticFetcher {
    fn fetch(&self, url: &str) -> Result<Html> {
        match self.pages.get(url) {
            Some(Page::Markup(markup)) => parse_document(markup),
            Some(Page::Status(status)) => {
                check_status(url, *status)?;
                parse_document("")
            }
            None => Err(Error::network(url, format!("HTTP {}", StatusCode::NOT_FOUND))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn test_check_status() {
        assert!(check_status("u", StatusCode::OK).is_ok());
        assert!(check_status("u", StatusCode::NO_CONTENT).is_ok());

        let err = check_status("https://www.example.com/news", StatusCode::SERVICE_UNAVAILABLE)
            .unwrap_err();
        assert!(err.is_network());
        assert!(err.to_string().contains("503"));

        assert!(check_status("u", StatusCode::NOT_FOUND).unwrap_err().is_network());
        assert!(check_status("u", StatusCode::MOVED_PERMANENTLY).unwrap_err().is_network());
    }

    #[test]
    fn test_check_content_type() {
        assert!(check_content_type("u", None).is_ok());
        assert!(check_content_type("u", Some("text/html; charset=utf-8")).is_ok());
        assert!(check_content_type("u", Some("application/xhtml+xml")).is_ok());
        assert!(check_content_type("u", Some("application/json")).unwrap_err().is_parse());
        assert!(check_content_type("u", Some("image/png")).unwrap_err().is_parse());
    }

    #[test]
    fn test_parse_document() {
        let doc = parse_document("<p>Hello</p>").unwrap();
        let p = Selector::parse("p").unwrap();
        assert_eq!(doc.select(&p).next().unwrap().text().collect::<String>(), "Hello");

        assert!(parse_document("").unwrap_err().is_parse());
        assert!(parse_document("  \n ").unwrap_err().is_parse());
    }

    #[test]
    fn test_static_fetcher() {
        let fetcher = StaticFetcher::new()
            .with_page("https://www.example.com/", "<h1>Front</h1>")
            .with_status("https://www.example.com/down", StatusCode::INTERNAL_SERVER_ERROR);

        assert!(fetcher.fetch("https://www.example.com/").is_ok());
        assert!(fetcher.fetch("https://www.example.com/down").unwrap_err().is_network());
        assert!(fetcher.fetch("https://www.example.com/missing").unwrap_err().is_network());
    }

    /// Serves one canned HTTP response on a local port and returns its URL.
    fn serve_once(head: &str, body: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/news", listener.local_addr().unwrap());
        let head = format!("{}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n", head, body.len());
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = [0u8; 1024];
            let _ = stream.read(&mut request);
            stream.write_all(head.as_bytes()).unwrap();
            stream.write_all(body).unwrap();
        });
        url
    }

    fn local_fetcher() -> HttpFetcher {
        HttpFetcher {
            client: Client::builder().no_proxy().build().unwrap(),
        }
    }

    #[test]
    fn test_declared_charset_is_decoded() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=iso-8859-1",
            b"<html><body><p>Caf\xe9 society</p></body></html>",
        );

        let doc = local_fetcher().fetch(&url).unwrap();
        let p = Selector::parse("p").unwrap();
        assert_eq!(doc.select(&p).next().unwrap().text().collect::<String>(), "Café society");
    }

    #[test]
    fn test_http_error_status_is_network_error() {
        let url = serve_once(
            "HTTP/1.1 503 Service Unavailable\r\nContent-Type: text/html",
            b"<p>down</p>",
        );

        let err = local_fetcher().fetch(&url).unwrap_err();
        assert!(err.is_network());
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_http_fetcher_builds() {
        assert!(HttpFetcher::new().is_ok());
    }
}
