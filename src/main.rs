use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use udlex_search::config::Settings;
use udlex_search::index::{self, BuildOptions, Layout, SourceMode};
use udlex_search::search::fetch::{self, IndexLocation};
use udlex_search::search::render::{HtmlRenderer, Render, TextRenderer};
use udlex_search::search::{CategorySelection, Direction, Filters, SearchContext, SortKey};

#[derive(Parser)]
#[command(name = "udlex_search", about = "Article search index for the UDLex site")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate articles/search/*.json and articles/categories.json
    Build {
        /// Scrape articles/categories/*/*.html instead of reading articles/articles.json
        #[arg(long)]
        from_html: bool,
        /// Site root (default: config `root`, then ".")
        #[arg(long)]
        root: Option<PathBuf>,
        /// Category for records that do not name one
        #[arg(long)]
        default_category: Option<String>,
    },
    /// Query a built index
    Search {
        /// Site root or http(s) base URL (default: config `source`, then `root`)
        #[arg(long)]
        source: Option<String>,
        /// Free-text filter over title, excerpt and tags
        #[arg(short, long, default_value = "")]
        query: String,
        /// Only these categories (default: all)
        #[arg(short, long = "category")]
        categories: Vec<String>,
        #[arg(long, value_enum, default_value_t = SortKey::Date)]
        sort: SortKey,
        /// Reverse the sort direction
        #[arg(long)]
        desc: bool,
        /// Print the results markup instead of text lines
        #[arg(long)]
        html: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load().context("Failed to load configuration")?;
    info!(?settings, "Starting");

    match cli.command {
        Commands::Build {
            from_html,
            root,
            default_category,
        } => {
            let layout = Layout::new(root.unwrap_or(settings.root));
            let opts = BuildOptions {
                mode: if from_html {
                    SourceMode::Html
                } else {
                    SourceMode::Structured
                },
                default_category: default_category.unwrap_or(settings.default_category),
            };

            let pb = ProgressBar::new(0);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")?
                    .progress_chars("=> "),
            );
            let report = index::build(&layout, &opts, &pb)
                .with_context(|| format!("Build failed under {}", layout.root().display()))?;
            println!(
                "Wrote {} articles ({} categories) to {} in {:.1}s",
                report.articles,
                report.categories,
                report.out_dir.display(),
                t0.elapsed().as_secs_f64()
            );
        }
        Commands::Search {
            source,
            query,
            categories,
            sort,
            desc,
            html,
        } => {
            let source = source
                .or(settings.source)
                .unwrap_or_else(|| settings.root.display().to_string());
            let location = IndexLocation::parse(&source)?;
            let ctx = SearchContext::new(fetch::load_index(&location).await);
            if ctx.is_empty() {
                warn!("No articles loaded from {}", source);
            }

            let selection = if categories.is_empty() {
                CategorySelection::all(ctx.categories())
            } else {
                CategorySelection::all(categories)
            };
            let filters = Filters {
                query,
                categories: selection,
                sort,
                direction: if desc {
                    Direction::Descending
                } else {
                    Direction::Ascending
                },
            };
            let results = ctx.apply(&filters);

            if html {
                let mut r = HtmlRenderer::new();
                r.render(&results);
                print!("{}", r.markup());
            } else {
                let mut r = TextRenderer::new();
                r.render(&results);
                print!("{}", r.output());
                println!("\n{} of {} articles", results.len(), ctx.len());
            }
        }
    }

    Ok(())
}
