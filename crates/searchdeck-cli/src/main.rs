use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use searchdeck_api::{BackendClient, RepositoryQuery};
use searchdeck_core::{messages, timefmt, Config, Error};
use searchdeck_tui::{run_tui, App};

#[derive(Parser)]
#[command(name = "searchdeck")]
#[command(version, about = "Terminal client for the keyword search backend", long_about = None)]
struct Cli {
    /// Backend base URL (overrides the config file)
    #[arg(long, env = "SEARCHDECK_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// One-shot keyword search, printed to stdout
    Search {
        /// Search keyword
        keyword: String,
    },
    /// Query saved records from the data repository
    Query {
        /// Filter by the keyword records were saved under
        #[arg(long)]
        keyword: Option<String>,
        /// Only records created on or after this date (YYYY-MM-DD)
        #[arg(long)]
        date_from: Option<String>,
        /// Only records created on or before this date (YYYY-MM-DD)
        #[arg(long)]
        date_to: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging - helps when things go sideways
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "searchdeck=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    let base_url = cli
        .base_url
        .unwrap_or_else(|| config.backend.base_url.clone());
    let client = BackendClient::with_retry_config(base_url, config.backend.retry_config());

    match cli.command {
        Some(Commands::Search { keyword }) => {
            let keyword = keyword.trim();
            if keyword.is_empty() {
                return Err(Error::Validation(messages::EMPTY_KEYWORD.into()).into());
            }

            tracing::info!("Searching for: {}", keyword);
            let response = client.search(keyword).await.map_err(Error::Api)?;
            if !response.is_success() {
                let text = response
                    .message
                    .unwrap_or_else(|| messages::SEARCH_FAILED.to_string());
                return Err(Error::Application(text).into());
            }

            if response.data.is_empty() {
                println!("{}", messages::NO_RESULTS);
                return Ok(());
            }
            for (i, item) in response.data.iter().enumerate() {
                println!(
                    "{:>3}. {}",
                    i + 1,
                    item.title.as_deref().unwrap_or(messages::NO_TITLE)
                );
                println!("     {}", item.url);
                if let Some(summary) = item.summary.as_deref() {
                    println!("     {}", summary);
                }
            }
        }
        Some(Commands::Query {
            keyword,
            date_from,
            date_to,
        }) => {
            let query = RepositoryQuery {
                keyword,
                date_from,
                date_to,
            };

            let response = client.get_repository_data(&query).await.map_err(Error::Api)?;
            if !response.is_success() {
                let text = response
                    .message
                    .unwrap_or_else(|| messages::QUERY_FAILED.to_string());
                return Err(Error::Application(text).into());
            }

            if response.data.is_empty() {
                println!("{}", messages::NO_MATCHING_DATA);
                return Ok(());
            }
            for record in &response.data {
                println!(
                    "{} | {} | {} | {} | {}",
                    record.title.as_deref().unwrap_or(messages::NO_TITLE),
                    record.url,
                    record.summary.as_deref().unwrap_or(messages::NO_SUMMARY),
                    record.search_keyword,
                    timefmt::format_timestamp(&record.created_at),
                );
            }
            println!("{}", messages::found_count(response.data.len()));
        }
        None => {
            run_tui(App::new(), client, config.ui.mouse_enabled).await?;
        }
    }

    Ok(())
}
