//! Flat tabular export of the collected series

use crate::error::Result;
use crate::price::PriceFrame;
use crate::series::SentimentSeries;
use std::path::{Path, PathBuf};

/// `{ticker}_price_data.csv` inside `dir`
pub fn price_csv_path(dir: &Path, ticker: &str) -> PathBuf {
    dir.join(format!("{ticker}_price_data.csv"))
}

/// `{ticker}_sentiment_data.csv` inside `dir`
pub fn sentiment_csv_path(dir: &Path, ticker: &str) -> PathBuf {
    dir.join(format!("{ticker}_sentiment_data.csv"))
}

/// Write one row per date; undefined derived values become empty fields,
/// never zeros.
pub fn write_price_csv(frame: &PriceFrame, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record([
        "Date",
        "Open",
        "High",
        "Low",
        "Close",
        "Volume",
        "Returns",
        "Realized_Volatility",
    ])?;

    for row in frame.rows() {
        writer.write_record([
            row.date.to_string(),
            row.open.to_string(),
            row.high.to_string(),
            row.low.to_string(),
            row.close.to_string(),
            row.volume.to_string(),
            optional_field(row.returns),
            optional_field(row.realized_volatility),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write one row per date of the daily sentiment series
pub fn write_sentiment_csv(series: &SentimentSeries, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(["Date", "Sentiment"])?;
    for (date, value) in series.iter() {
        writer.write_record([date.to_string(), value.to_string()])?;
    }

    writer.flush()?;
    Ok(())
}

fn optional_field(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Quote;
    use crate::series::ScoredItem;
    use chrono::NaiveDate;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "market-pulse-{}-{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    fn quote(day: u32, close: f64) -> Quote {
        let timestamp = NaiveDate::from_ymd_opt(2024, 2, day)
            .expect("valid date")
            .and_hms_opt(21, 0, 0)
            .expect("valid time")
            .and_utc();
        Quote {
            symbol: "TEST".to_string(),
            timestamp,
            open: close,
            high: close,
            low: close,
            close,
            volume: 500,
            adjclose: close,
        }
    }

    #[test]
    fn test_csv_paths() {
        let dir = Path::new("/tmp/out");
        assert_eq!(
            price_csv_path(dir, "AAPL"),
            PathBuf::from("/tmp/out/AAPL_price_data.csv")
        );
        assert_eq!(
            sentiment_csv_path(dir, "AAPL"),
            PathBuf::from("/tmp/out/AAPL_sentiment_data.csv")
        );
    }

    #[test]
    fn test_price_csv_shape() {
        let dir = scratch_dir("price");
        let path = price_csv_path(&dir, "TEST");

        let frame = PriceFrame::from_quotes(&[quote(1, 100.0), quote(2, 102.0)]);
        write_price_csv(&frame, &path).expect("write succeeds");

        let contents = fs::read_to_string(&path).expect("read back");
        let lines: Vec<&str> = contents.lines().collect();

        assert_eq!(
            lines[0],
            "Date,Open,High,Low,Close,Volume,Returns,Realized_Volatility"
        );
        assert_eq!(lines.len(), 3);
        // First row has no return and no volatility: trailing empty fields.
        assert!(lines[1].starts_with("2024-02-01,"));
        assert!(lines[1].ends_with(",,"));
        assert!(lines[2].contains("0.02"));

        fs::remove_dir_all(&dir).expect("cleanup");
    }

    #[test]
    fn test_sentiment_csv_shape() {
        let dir = scratch_dir("sentiment");
        let path = sentiment_csv_path(&dir, "TEST");

        let items = vec![ScoredItem {
            timestamp: NaiveDate::from_ymd_opt(2024, 2, 1)
                .expect("valid date")
                .and_hms_opt(12, 0, 0)
                .expect("valid time")
                .and_utc(),
            score: 0.25,
        }];
        let series = SentimentSeries::from_items(&items);
        write_sentiment_csv(&series, &path).expect("write succeeds");

        let contents = fs::read_to_string(&path).expect("read back");
        let lines: Vec<&str> = contents.lines().collect();

        assert_eq!(lines[0], "Date,Sentiment");
        assert_eq!(lines[1], "2024-02-01,0.25");

        fs::remove_dir_all(&dir).expect("cleanup");
    }

    #[test]
    fn test_empty_series_writes_header_only() {
        let dir = scratch_dir("empty");
        let path = sentiment_csv_path(&dir, "TEST");

        write_sentiment_csv(&SentimentSeries::default(), &path).expect("write succeeds");

        let contents = fs::read_to_string(&path).expect("read back");
        assert_eq!(contents.lines().count(), 1);

        fs::remove_dir_all(&dir).expect("cleanup");
    }
}
