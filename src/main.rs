use async_trait::async_trait;
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result, miette};
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use talenest_config::Config;
use talenest_extract::models::Placement;
use talenest_extract::{Extractor, PageProbe, PageSnapshot, Tab, series_key};
use talenest_library::{AddOptions, Board, Topic};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Config file to use instead of the one in the platform config directory.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// More output, repeatable. Ignored when `RUST_LOG` is set.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the canonical title for a page.
    Title {
        #[arg(long)]
        url: String,
        #[arg(long)]
        title: String,
        /// Leading visible text of the page.
        #[arg(long, default_value = "")]
        body: String,
    },
    /// Print the series key of a title.
    Key { title: String },
    /// Show where a title would be placed among existing entries.
    Place {
        /// JSON object of category name to an array of titles.
        #[arg(long)]
        snapshot: PathBuf,
        #[arg(long)]
        title: String,
        /// Category to add to when no series matches; the first one if unset.
        #[arg(long)]
        category: Option<String>,
    },
    /// Run the whole add-from-page flow, without saving.
    Add {
        /// JSON object of category name to an array of titles, replacing the
        /// topic's configured categories.
        #[arg(long)]
        snapshot: Option<PathBuf>,
        /// Topic to add to; anime if unset.
        #[arg(long)]
        topic: Option<String>,
        #[arg(long)]
        url: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        body: String,
        /// Category to add to when no series matches; the first one if unset.
        #[arg(long)]
        category: Option<String>,
    },
}

/// A page whose contents were given on the command line.
struct GivenPage(PageSnapshot);

#[async_trait]
impl PageProbe for GivenPage {
    async fn snapshot(&self, _tab: &Tab) -> talenest_extract::error::Result<PageSnapshot> {
        Ok(self.0.clone())
    }
}

/// Renders an `exn` error tree, which carries its own locations.
fn report<E: Debug>(error: E) -> miette::Report {
    miette!("{error:?}")
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn read_snapshot(path: &Path) -> Result<BTreeMap<String, Vec<String>>> {
    let contents = std::fs::read_to_string(path).into_diagnostic()?;
    serde_json::from_str(&contents).into_diagnostic()
}

fn board_from_snapshot(entries: &BTreeMap<String, Vec<String>>) -> Result<Board> {
    let mut board = Board::new(entries.keys());
    for (category, titles) in entries {
        for title in titles {
            board.insert(&Placement::end_of(category, usize::MAX), title).map_err(report)?;
        }
    }
    Ok(board)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load(cli.config.as_deref()).map_err(report)?;

    match cli.command {
        Command::Title { url, title, body } => {
            let body = talenest_extract::safe_text_truncate(&body, config.probe.body_chars);
            let extraction = Extractor::default().extract(&url, &title, body);
            let builder = config.title.builder().map_err(report)?;
            println!("{}", builder.build(&extraction.raw_title, &extraction));
        },
        Command::Key { title } => {
            println!("{}", series_key(&title));
        },
        Command::Place {
            snapshot,
            title,
            category,
        } => {
            let entries = read_snapshot(&snapshot)?;
            let default = category
                .or_else(|| entries.keys().next().cloned())
                .ok_or_else(|| miette!("snapshot has no categories"))?;
            let matcher = config.matching.matcher();
            let matches = matcher.find_all_matches(&entries, &title);
            let placement = matcher.plan_placement(&entries, &default, &title);
            let output = serde_json::json!({ "matches": matches, "placement": placement });
            println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
        },
        Command::Add {
            snapshot,
            topic,
            url,
            title,
            body,
            category,
        } => {
            let mut shelf = config.library.shelf().map_err(report)?;
            if let Some(topic) = topic {
                shelf.set_active(topic.parse::<Topic>().map_err(report)?);
            }
            let active = shelf.active();
            if let Some(snapshot) = snapshot {
                *shelf.board_mut(active) = board_from_snapshot(&read_snapshot(&snapshot)?)?;
            }
            if let Some(category) = category {
                shelf.board_mut(active).set_default_category(&category).map_err(report)?;
            }
            let options = AddOptions {
                probe: config.probe.options(),
                titles: config.title.builder().map_err(report)?,
                matcher: config.matching.matcher(),
                ..AddOptions::default()
            };
            let probe = GivenPage(PageSnapshot::new(url.clone(), title.clone(), body));
            let added = shelf.add_from_page(&probe, &Tab::new(url, title), &options).await.map_err(report)?;
            println!("{} -> {} #{}", added.title, added.placement.category, added.placement.index);
            let titles = shelf.board(added.topic).and_then(|board| board.titles(&added.placement.category));
            for (index, title) in titles.unwrap_or_default().iter().enumerate() {
                println!("  {index:>3}  {title}");
            }
        },
    }
    Ok(())
}
