//! Price history and derived return statistics

use crate::api::{Quote, YahooFinanceClient};
use crate::error::{PulseError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use tracing::warn;

/// Trading days per year, used for the rolling window and annualization
const TRADING_DAYS_PER_YEAR: usize = 252;

/// One daily price row with derived columns
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRow {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    /// Close-to-close simple return; `None` for the first row
    pub returns: Option<f64>,
    /// Annualized rolling standard deviation of returns; `None` until a
    /// full window of returns exists
    pub realized_volatility: Option<f64>,
}

/// Date-ordered daily price rows
#[derive(Debug, Clone, Default)]
pub struct PriceFrame {
    rows: Vec<PriceRow>,
}

impl PriceFrame {
    /// Derive the return columns from raw OHLCV quotes.
    ///
    /// Derived values stay absent where insufficient history exists; they
    /// are never coerced to zero.
    pub fn from_quotes(quotes: &[Quote]) -> Self {
        let closes: Vec<f64> = quotes.iter().map(|q| q.close).collect();
        let returns = simple_returns(&closes);
        let volatility = rolling_volatility(&returns, TRADING_DAYS_PER_YEAR);

        let rows = quotes
            .iter()
            .enumerate()
            .map(|(i, q)| PriceRow {
                date: q.timestamp.date_naive(),
                open: q.open,
                high: q.high,
                low: q.low,
                close: q.close,
                volume: q.volume,
                returns: returns[i],
                realized_volatility: volatility[i],
            })
            .collect();

        Self { rows }
    }

    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|row| row.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|row| row.date)
    }
}

/// Simple percentage change between consecutive closes
fn simple_returns(closes: &[f64]) -> Vec<Option<f64>> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            if i == 0 {
                return None;
            }
            let prev = closes[i - 1];
            if prev == 0.0 {
                return None;
            }
            Some(close / prev - 1.0)
        })
        .collect()
}

/// Trailing-window sample standard deviation of returns, annualized
///
/// A window containing any undefined return stays undefined.
fn rolling_volatility(returns: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let annualize = (window as f64).sqrt();

    (0..returns.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let mut values = Vec::with_capacity(window);
            for r in &returns[i + 1 - window..=i] {
                match r {
                    Some(v) => values.push(*v),
                    None => return None,
                }
            }
            sample_std(&values).map(|sd| sd * annualize)
        })
        .collect()
}

fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Some(variance.sqrt())
}

/// Builds a `PriceFrame` from the quote provider
pub struct PriceSeriesBuilder {
    client: YahooFinanceClient,
}

impl PriceSeriesBuilder {
    pub fn new() -> Self {
        Self {
            client: YahooFinanceClient::new(),
        }
    }

    /// Fetch daily OHLCV for `[start, end]` and derive the return columns.
    ///
    /// A provider with no rows for the symbol/range (unknown ticker, zero
    /// trading days) yields an empty frame, not an error; callers check
    /// `is_empty()` before downstream use.
    pub async fn build(
        &self,
        ticker: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<PriceFrame> {
        match self.client.daily_history(ticker, start, end).await {
            Ok(quotes) => Ok(PriceFrame::from_quotes(&quotes)),
            Err(PulseError::YahooFinanceError(reason)) => {
                warn!(ticker, reason = %reason, "no price data returned");
                Ok(PriceFrame::default())
            }
            Err(e) => Err(e),
        }
    }
}

impl Default for PriceSeriesBuilder {
    fn default() -> Self {
        Self::new()
    }
}
