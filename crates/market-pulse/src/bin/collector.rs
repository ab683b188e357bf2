//! Data collection CLI
//!
//! Fetches price history and Reddit sentiment for a ticker and writes both
//! to CSV files.
//!
//! # Usage
//!
//! ```bash
//! # Set up Reddit credentials (script-type app)
//! export REDDIT_CLIENT_ID="your-client-id"
//! export REDDIT_CLIENT_SECRET="your-client-secret"
//! export REDDIT_USER_AGENT="market-pulse/0.1 (contact@example.com)"
//!
//! # Collect 30 days of AAPL data into the current directory
//! cargo run --bin collector -p market-pulse -- AAPL
//!
//! # Explicit window and forums
//! cargo run --bin collector -p market-pulse -- TSLA \
//!     --start 2024-01-01 --end 2024-03-01 --forums wallstreetbets,stocks
//! ```

use anyhow::Context;
use chrono::{Days, NaiveDate, NaiveTime, Utc};
use clap::Parser;
use market_pulse::export::{
    price_csv_path, sentiment_csv_path, write_price_csv, write_sentiment_csv,
};
use market_pulse::{
    CollectorConfig, LexiconScorer, PriceSeriesBuilder, RedditClient, RedditCredentials,
    SentimentAggregator, Throttle,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "collector")]
#[command(about = "Collect price history and Reddit sentiment for a ticker", long_about = None)]
struct Args {
    /// Stock ticker symbol (e.g. AAPL)
    ticker: String,

    /// Start date (YYYY-MM-DD); defaults to 30 days before the end date
    #[arg(long)]
    start: Option<NaiveDate>,

    /// End date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Subreddits to search
    #[arg(long, default_value = "wallstreetbets,stocks,investing", value_delimiter = ',')]
    forums: Vec<String>,

    /// Directory for the exported CSV files
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn,market_pulse=info".to_string()),
        )
        .init();

    let args = Args::parse();
    let ticker = args.ticker.to_uppercase();

    let end_date = args.end.unwrap_or_else(|| Utc::now().date_naive());
    let start_date = match args.start {
        Some(date) => date,
        None => end_date
            .checked_sub_days(Days::new(30))
            .context("start date out of range")?,
    };
    if start_date > end_date {
        anyhow::bail!("start date {start_date} is after end date {end_date}");
    }

    // Inclusive window: midnight at the start, end of day at the end.
    let start = start_date.and_time(NaiveTime::MIN).and_utc();
    let end = end_date
        .and_hms_micro_opt(23, 59, 59, 999_999)
        .context("invalid end date")?
        .and_utc();

    let credentials =
        RedditCredentials::from_env().context("Reddit credentials are required")?;
    let config = Arc::new(CollectorConfig::builder().reddit(credentials).build()?);
    let throttle = Arc::new(Throttle::with_interval(config.rate_limit_delay));

    println!("Collecting price history for {ticker} ({start_date} to {end_date})...");
    let price = PriceSeriesBuilder::new().build(&ticker, start, end).await?;
    if price.is_empty() {
        println!("  no price rows returned (unknown ticker or no trading days in range)");
    } else if let (Some(first), Some(last)) = (price.first_date(), price.last_date()) {
        println!("  {} rows, {first} to {last}", price.len());
    }

    println!("Collecting Reddit sentiment across {} forums...", args.forums.len());
    let source = RedditClient::new(&config, Arc::clone(&throttle))?;
    let aggregator =
        SentimentAggregator::new(source, LexiconScorer::new(), Arc::clone(&config), throttle);
    let report = aggregator.aggregate(&ticker, start, end, &args.forums).await;

    for outcome in &report.forums {
        match &outcome.result {
            Ok(stats) => println!(
                "  r/{}: {} scored / {} seen",
                outcome.forum, stats.items_scored, stats.items_seen
            ),
            Err(e) => println!("  r/{}: failed ({e})", outcome.forum),
        }
    }

    let series = &report.series;
    if series.is_empty() {
        println!("  no discussion items matched the window");
    } else {
        let (min, max, sum) = series.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), (_, value)| (min.min(value), max.max(value), sum + value),
        );
        println!(
            "  {} days of sentiment, mean {:.4} (min {:.4}, max {:.4})",
            series.len(),
            sum / series.len() as f64,
            min,
            max
        );
    }

    std::fs::create_dir_all(&args.out_dir)?;

    let price_path = price_csv_path(&args.out_dir, &ticker);
    write_price_csv(&price, &price_path)?;

    let sentiment_path = sentiment_csv_path(&args.out_dir, &ticker);
    write_sentiment_csv(series, &sentiment_path)?;

    println!(
        "Wrote {} and {}",
        price_path.display(),
        sentiment_path.display()
    );

    Ok(())
}
