use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use clap::Parser;
use nr_core::{FrontPage, SiteConfig};
use nr_scrapers::{init_logging, save_article, Fetcher, HttpFetcher, NewsReader};
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(author, version, about = "Read the headlines and stories from a news front page", long_about = None)]
pub struct Cli {
    /// JSON file describing an alternative site layout (defaults to BBC News world)
    #[arg(long)]
    site: Option<PathBuf>,
    /// Column width used to wrap article text
    #[arg(long)]
    width: Option<usize>,
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug, PartialEq)]
enum Commands {
    /// List the current front-page headlines
    Headlines {
        /// Print the front-page snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the article behind a headline number as listed by `headlines`
    Read {
        number: usize,
        /// Append the article to a dated text file
        #[arg(long)]
        save: bool,
        /// Directory for saved articles
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Pick headlines interactively (default)
    Browse {
        /// Directory for saved articles
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

fn load_site(cli: &Cli) -> anyhow::Result<SiteConfig> {
    let mut site = match &cli.site {
        Some(path) => SiteConfig::from_json_file(path)
            .with_context(|| format!("Failed to load site config from {}", path.display()))?,
        None => SiteConfig::bbc_world(),
    };
    if let Some(width) = cli.width {
        site = site.with_wrap_width(width);
    }
    Ok(site)
}

fn print_headlines<W: Write>(out: &mut W, page: &FrontPage) -> io::Result<()> {
    for (i, entry) in page.iter().enumerate() {
        writeln!(out, "{:>3}. {}", i + 1, entry.headline.trim())?;
    }
    Ok(())
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

/// Reads one line, `None` on end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Asks a yes/no question until it gets an answer. End of input counts as no.
fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str, default: bool) -> io::Result<bool> {
    let hint = if default { "[Y/n]" } else { "[y/N]" };
    loop {
        write!(out, "{} {} ", question, hint)?;
        out.flush()?;
        match read_line(input)?.as_deref().map(str::to_ascii_lowercase).as_deref() {
            None => return Ok(false),
            Some("") => return Ok(default),
            Some("y") | Some("yes") => return Ok(true),
            Some("n") | Some("no") => return Ok(false),
            Some(_) => writeln!(out, "Please answer y or n.")?,
        }
    }
}

/// Prompts for a 1-based headline number and returns its index. `None` when
/// the user quits.
fn choose_headline<R: BufRead, W: Write>(input: &mut R, out: &mut W, count: usize) -> io::Result<Option<usize>> {
    loop {
        write!(out, "Select a headline (1-{}, q to quit): ", count)?;
        out.flush()?;
        let Some(answer) = read_line(input)? else {
            return Ok(None);
        };
        if answer.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        match answer.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => return Ok(Some(n - 1)),
            _ => writeln!(out, "Please enter a number between 1 and {}.", count)?,
        }
    }
}

/// Interactive loop: list, pick, read, optionally save, repeat.
///
/// The front page is fetched again at the start of every cycle. A failed
/// fetch or save abandons that cycle only.
fn browse<F, R, W>(reader: &NewsReader<F>, input: &mut R, out: &mut W, dir: &Path) -> anyhow::Result<()>
where
    F: Fetcher,
    R: BufRead,
    W: Write,
{
    loop {
        match reader.load_front_page() {
            Ok(page) if page.is_empty() => {
                writeln!(out, "No headlines found on {}.", page.url)?;
            }
            Ok(page) => {
                writeln!(out, "{}", reader.site().name)?;
                print_headlines(out, &page)?;

                let Some(index) = choose_headline(input, out, page.len())? else {
                    return Ok(());
                };

                match reader.read_article(&page, index) {
                    Ok(article) => {
                        writeln!(out)?;
                        write!(out, "{}", article.body)?;
                        if ask(input, out, "Save this article?", false)? {
                            match save_article(dir, today(), &article) {
                                Ok(path) => writeln!(out, "Saved to {}", path.display())?,
                                Err(e) => writeln!(out, "Could not save article: {}", e)?,
                            }
                        }
                    }
                    Err(e) => writeln!(out, "Could not load article: {}", e)?,
                }
            }
            Err(e) => writeln!(out, "Could not load headlines: {}", e)?,
        }

        if !ask(input, out, "Continue?", true)? {
            return Ok(());
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(if cli.verbose { Level::DEBUG } else { Level::INFO });

    let site = load_site(&cli)?;
    info!("📰 Reading {} ({})", site.name, site.front_page_url());
    let reader = NewsReader::new(HttpFetcher::new()?, site)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command.unwrap_or(Commands::Browse { dir: PathBuf::from(".") }) {
        Commands::Headlines { json } => {
            let page = reader.load_front_page()?;
            if json {
                serde_json::to_writer_pretty(&mut out, &page)?;
                writeln!(out)?;
            } else {
                print_headlines(&mut out, &page)?;
            }
        }
        Commands::Read { number, save, dir } => {
            let index = number
                .checked_sub(1)
                .ok_or_else(|| anyhow!("Headline numbers start at 1"))?;
            let page = reader.load_front_page()?;
            let article = reader.read_article(&page, index)?;
            write!(out, "{}", article.body)?;
            if save {
                let path = save_article(&dir, today(), &article)?;
                info!("💾 Saved to {}", path.display());
            }
        }
        Commands::Browse { dir } => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            browse(&reader, &mut input, &mut out, &dir)?;
        }
    }

    Ok(())
}
