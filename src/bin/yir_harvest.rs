//! Command-line entry point: merge URLs into the catalog, regenerate the URL
//! list from it, or inspect what extraction finds on a single page.

use std::io::{self, Read};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use yir_harvest::{pipeline, url_list, Catalog, Fetcher, Options, DEFAULT_USER_AGENT};

#[derive(Parser)]
#[command(name = "yir-harvest", about = "Year-in-review post catalog builder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch new URLs and enrich incomplete entries, then save the catalog
    Add {
        /// Newline-delimited list of post URLs
        #[arg(long, env = "YIR_URLS", default_value = "data/urls.txt")]
        urls: PathBuf,
        /// Catalog JSON file
        #[arg(long, env = "YIR_CATALOG", default_value = "data/catalog.json")]
        catalog: PathBuf,
        /// Per-request timeout in seconds
        #[arg(long, default_value = "30")]
        timeout: u64,
        /// Redirect hops followed before giving up
        #[arg(long, default_value = "5")]
        max_redirects: usize,
        /// User-Agent header sent with every request
        #[arg(long, default_value = DEFAULT_USER_AGENT)]
        user_agent: String,
        /// Run everything but leave the catalog file untouched
        #[arg(long)]
        dry_run: bool,
    },
    /// Regenerate the URL list from the catalog
    Urls {
        /// Catalog JSON file
        #[arg(long, env = "YIR_CATALOG", default_value = "data/catalog.json")]
        catalog: PathBuf,
        /// Output file, one URL per line
        #[arg(long, env = "YIR_URLS", default_value = "data/urls.txt")]
        urls: PathBuf,
    },
    /// Print what extraction finds for one URL as JSON
    Inspect {
        /// Page URL (also used for the title/author/year fallbacks)
        url: String,
        /// Read the page from stdin instead of fetching it
        #[arg(long)]
        stdin: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = execute(cli.command).await;

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    result
}

async fn execute(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Add {
            urls,
            catalog,
            timeout,
            max_redirects,
            user_agent,
            dry_run,
        } => {
            let opts = Options {
                urls_path: urls,
                catalog_path: catalog,
                user_agent,
                timeout: Duration::from_secs(timeout),
                max_redirects,
                dry_run,
            };
            let summary = pipeline::run(&opts).await?;
            if !summary.has_changes() {
                println!("No new URLs to add and no posts to enrich.");
            }
            println!("{summary}");
        }
        Commands::Urls { catalog, urls } => {
            let store = Catalog::load(&catalog)
                .with_context(|| format!("loading {}", catalog.display()))?;
            if store.is_empty() {
                bail!("No URLs found in {}", catalog.display());
            }
            let written = url_list::write_url_list(&store, &urls)?;
            println!("✓ Extracted {written} URLs to {}", urls.display());
        }
        Commands::Inspect { url, stdin } => {
            let content = if stdin {
                let mut html = String::new();
                io::stdin()
                    .read_to_string(&mut html)
                    .context("reading page from stdin")?;
                html
            } else {
                let fetcher = Fetcher::new(&Options::default())?;
                fetcher
                    .fetch(&url)
                    .await
                    .with_context(|| format!("fetching {url}"))?
            };

            let result = yir_harvest::extract(&content, &url);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
