use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use newsview::{ArticleId, Config, Document, MemoryMount, ViewController};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Fetch articles from the news API and render them into an HTML page
#[derive(Parser)]
#[command(name = "newsview", version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to <config dir>/newsview/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scheme and host of the backend, e.g. http://127.0.0.1:8000
    #[arg(long)]
    origin: Option<String>,

    /// API base path
    #[arg(long)]
    api_base: Option<String>,

    /// Host document containing a `{{ content }}` mount point
    #[arg(long)]
    template: Option<PathBuf>,

    /// Write the page here instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Latest articles (default)
    List,
    /// A single article
    Article { id: ArticleId },
    /// Featured articles
    Featured,
    /// Articles whose title matches the query
    Search { query: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "newsview=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(origin) = cli.origin {
        config.origin = origin;
    }
    if let Some(api_base) = cli.api_base {
        config.api_base = api_base;
    }
    if let Some(template) = cli.template {
        config.template = Some(template);
    }

    let document = match &config.template {
        Some(path) => Document::from_file(path)?,
        None => Document::builtin()?,
    };

    let controller = ViewController::new(&config, MemoryMount::new())?;
    match cli.command.unwrap_or(Command::List) {
        Command::List => controller.init().await,
        Command::Article { id } => controller.load_article_detail(id).await,
        Command::Featured => controller.load_featured().await,
        Command::Search { query } => controller.search(&query).await,
    }

    let page = document.render(&controller.mount().current());
    match cli.out {
        Some(path) => std::fs::write(&path, page)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{page}"),
    }

    Ok(())
}
