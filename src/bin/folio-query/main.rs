use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};

use folio::content_store::ContentStore;
use folio::debounce::DebouncedSearch;
use folio::filter_state::FilterState;
use folio::listing::ListingView;
use folio::query_string::QueryString;
use folio::ranking::{highlights, RankingWeights};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
enum Args {
    /// Run one listing and print it as JSON
    List(ListArgs),
    /// Print the featured and trending records as JSON
    Highlights(HighlightsArgs),
    /// Search as you type: every stdin line is the new search text
    Interactive(InteractiveArgs),
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ListArgs {
    /// JSON file with the content records
    #[arg(short, long)]
    content_file: PathBuf,

    /// Listing section
    #[arg(short, long, default_value_t = View::Resources)]
    view: View,

    /// Query string, e.g. "tag=rust&page=2"
    #[arg(short, long, default_value = "")]
    query: String,

    /// Page size, defaults to the section's own
    #[arg(short, long)]
    page_size: Option<u32>,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct HighlightsArgs {
    /// JSON file with the content records
    #[arg(short, long)]
    content_file: PathBuf,

    /// Number of trending records
    #[arg(short, long, default_value_t = 3)]
    trending: usize,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct InteractiveArgs {
    /// JSON file with the content records
    #[arg(short, long)]
    content_file: PathBuf,

    /// Listing section
    #[arg(short, long, default_value_t = View::Resources)]
    view: View,

    /// Quiet time before a search runs
    #[arg(short, long, default_value_t = 300)]
    debounce_ms: u64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum View {
    Blog,
    Resources,
    Tutorials,
}

impl View {
    fn listing(&self, page_size: Option<u32>) -> ListingView {
        match self {
            View::Blog => ListingView::blog(page_size.unwrap_or(6)),
            View::Resources => ListingView::resources(page_size.unwrap_or(9)),
            View::Tutorials => ListingView::tutorials(page_size.unwrap_or(6)),
        }
    }
}

impl Display for View {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            View::Blog => "blog",
            View::Resources => "resources",
            View::Tutorials => "tutorials",
        };
        write!(f, "{}", name)
    }
}

fn list_cmd(args: ListArgs) -> Result<()> {
    let store = ContentStore::from_file(&args.content_file)?;
    let view = args.view.listing(args.page_size);
    let state = QueryString::from(&args.query).to_filter_state();
    let page = view.run(store.records(), &state);
    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}

fn highlights_cmd(args: HighlightsArgs) -> Result<()> {
    let store = ContentStore::from_file(&args.content_file)?;
    let res = highlights(store.records(), &RankingWeights::default(), args.trending);
    println!("{}", serde_json::to_string_pretty(&res)?);
    Ok(())
}

async fn interactive_cmd(args: InteractiveArgs) -> Result<()> {
    let store = Arc::new(ContentStore::from_file(&args.content_file)?);
    let view = args.view.listing(None);

    let search = DebouncedSearch::spawn(Duration::from_millis(args.debounce_ms), move |query| {
        let mut state = FilterState::default();
        state.set_search_query(&query);
        let page = view.run(store.records(), &state);
        println!("-- '{}': {} match(es), page {}/{}", query, page.total, page.page, page.total_pages);
        for item in page.items.iter() {
            println!("   {}  {}", item.route, item.record.title);
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        search.input(&line);
    }

    search.finish().await;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    match args {
        Args::List(args) => list_cmd(args),
        Args::Highlights(args) => highlights_cmd(args),
        Args::Interactive(args) => interactive_cmd(args).await,
    }
}
