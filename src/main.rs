//! CLI entry point for gitblog-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gitblog_rs::config::{Settings, SETTINGS_FILE};
use gitblog_rs::error::BlogError;
use gitblog_rs::store::{GroupMode, SortMode};
use gitblog_rs::Blog;

#[derive(Parser)]
#[command(name = "gitblog")]
#[command(version)]
#[command(about = "Browse a Markdown blog stored in a GitHub repository", long_about = None)]
struct Cli {
    /// Settings file (defaults to ./gitblog.yml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Repository owner
    #[arg(long, global = true)]
    owner: Option<String>,

    /// Repository name
    #[arg(long, global = true)]
    repo: Option<String>,

    /// Read posts from a local directory instead of GitHub
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Posts per page
    #[arg(long, global = true)]
    per_page: Option<usize>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a page of posts
    #[command(alias = "ls")]
    List {
        /// Page number
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Sort by: date, title
        #[arg(short, long, default_value = "date")]
        sort: SortMode,

        /// Group by: none, tags, month, year
        #[arg(short, long, default_value = "none")]
        group: GroupMode,
    },

    /// Show a post
    Show {
        /// Post file name, e.g. hello-world.md
        filename: String,
    },

    /// List all tags
    Tags,

    /// List posts with a tag
    Tag {
        name: String,
    },

    /// Show the site's about section
    About,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "gitblog_rs=debug,info"
    } else {
        "gitblog_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = load_settings(&cli)?;
    tracing::debug!("Using settings: {:?}", settings);

    let blog = match Blog::open(settings).await {
        Ok(blog) => blog,
        Err(e) => {
            show_error(&e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::List { page, sort, group } => {
            gitblog_rs::commands::list::run(&blog, page, sort, group)
        }
        Commands::Show { filename } => gitblog_rs::commands::show::run(&blog, &filename).await,
        Commands::Tags => gitblog_rs::commands::tags::run(&blog),
        Commands::Tag { name } => gitblog_rs::commands::tags::show(&blog, &name),
        Commands::About => gitblog_rs::commands::about::run(&blog),
    };

    if let Err(e) = result {
        match e.downcast_ref::<BlogError>() {
            Some(blog_error) => show_error(blog_error),
            None => return Err(e),
        }
        std::process::exit(1);
    }

    Ok(())
}

/// Settings file overlaid with command-line flags
fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::load_or_default(SETTINGS_FILE)?,
    };

    if let Some(owner) = &cli.owner {
        settings.owner = owner.clone();
    }
    if let Some(repo) = &cli.repo {
        settings.repo = repo.clone();
    }
    if let Some(dir) = &cli.dir {
        settings.local_dir = Some(dir.clone());
    }
    if let Some(per_page) = cli.per_page {
        settings.per_page = per_page;
    }

    settings.validate()?;
    Ok(settings)
}

/// The error view: what went wrong and the way back
fn show_error(error: &BlogError) {
    match error {
        BlogError::LoadFailed(_) => {
            eprintln!("Error: Failed to fetch blog posts. Please try again later.");
            eprintln!("  ({})", error);
        }
        BlogError::FetchError { .. } => {
            eprintln!("Error: {}", error);
            eprintln!("The post could not be fetched; run the same command again to retry.");
        }
        _ => eprintln!("Error: {}", error),
    }
    eprintln!("Return to the posts list with `gitblog list`.");
}
