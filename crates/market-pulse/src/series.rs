//! Scored discussion items and the daily sentiment series

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;

/// One discussion item reduced to a single scalar
///
/// The score combines the post's own text with up to N of its top-level
/// replies. Created once per qualifying item, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredItem {
    /// When the item was created (source-supplied, UTC)
    pub timestamp: DateTime<Utc>,
    /// Combined polarity of the item and its counted replies
    pub score: f64,
}

/// Daily mean sentiment, gap-free from the first to the last observed date
///
/// When at least one item exists, the index is the contiguous daily
/// calendar range `[min item date, max item date]`; dates without items
/// carry the most recent earlier mean forward. With no items the series is
/// empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SentimentSeries {
    points: BTreeMap<NaiveDate, f64>,
}

impl SentimentSeries {
    /// Group items by UTC calendar date, average each date, then resample
    /// to a contiguous daily index with forward-fill.
    ///
    /// The index spans the observed dates only; there is no back-fill
    /// before the first observation.
    pub fn from_items(items: &[ScoredItem]) -> Self {
        if items.is_empty() {
            return Self::default();
        }

        let mut by_date: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
        for item in items {
            by_date
                .entry(item.timestamp.date_naive())
                .or_default()
                .push(item.score);
        }

        let means: BTreeMap<NaiveDate, f64> = by_date
            .into_iter()
            .map(|(date, scores)| {
                let mean = scores.iter().sum::<f64>() / scores.len() as f64;
                (date, mean)
            })
            .collect();

        let (Some((&first, _)), Some((&last, _))) =
            (means.first_key_value(), means.last_key_value())
        else {
            return Self::default();
        };

        let mut points = BTreeMap::new();
        let mut carry = None;
        let mut date = first;
        while date <= last {
            if let Some(&mean) = means.get(&date) {
                carry = Some(mean);
            }
            if let Some(value) = carry {
                points.insert(date, value);
            }
            match date.succ_opt() {
                Some(next) => date = next,
                None => break,
            }
        }

        Self { points }
    }

    /// Mean sentiment for a date, if the date is inside the series index
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.points.get(&date).copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first_key_value().map(|(date, _)| *date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last_key_value().map(|(date, _)| *date)
    }

    /// Date-ordered iteration over the series
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.points.iter().map(|(date, value)| (*date, *value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(date: NaiveDate, hour: u32, score: f64) -> ScoredItem {
        let timestamp = date
            .and_hms_opt(hour, 0, 0)
            .expect("valid time")
            .and_utc();
        ScoredItem { timestamp, score }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).expect("valid date")
    }

    #[test]
    fn test_empty_items_empty_series() {
        let series = SentimentSeries::from_items(&[]);
        assert!(series.is_empty());
        assert_eq!(series.len(), 0);
        assert_eq!(series.first_date(), None);
    }

    #[test]
    fn test_same_day_items_are_averaged() {
        let items = vec![item(day(5), 9, 0.2), item(day(5), 15, 0.4)];
        let series = SentimentSeries::from_items(&items);

        assert_eq!(series.len(), 1);
        let value = series.get(day(5)).expect("day present");
        assert!((value - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_time_of_day_is_discarded() {
        let items = vec![item(day(5), 0, 0.5), item(day(5), 23, 0.1)];
        let series = SentimentSeries::from_items(&items);

        assert_eq!(series.len(), 1);
        assert_eq!(series.first_date(), Some(day(5)));
    }

    #[test]
    fn test_gaps_are_forward_filled() {
        let items = vec![item(day(1), 12, 0.4), item(day(4), 12, 0.8)];
        let series = SentimentSeries::from_items(&items);

        assert_eq!(series.len(), 4);
        assert_eq!(series.get(day(1)), Some(0.4));
        assert_eq!(series.get(day(2)), Some(0.4));
        assert_eq!(series.get(day(3)), Some(0.4));
        assert_eq!(series.get(day(4)), Some(0.8));
    }

    #[test]
    fn test_index_spans_observed_dates_only() {
        let items = vec![item(day(10), 8, -0.2), item(day(12), 8, 0.6)];
        let series = SentimentSeries::from_items(&items);

        assert_eq!(series.first_date(), Some(day(10)));
        assert_eq!(series.last_date(), Some(day(12)));
        assert_eq!(series.get(day(9)), None);
        assert_eq!(series.get(day(13)), None);

        for (date, _) in series.iter() {
            assert!(date >= day(10) && date <= day(12));
        }
    }

    #[test]
    fn test_single_item_single_entry() {
        let items = vec![item(day(7), 10, 0.4)];
        let series = SentimentSeries::from_items(&items);

        assert_eq!(series.len(), 1);
        assert_eq!(series.get(day(7)), Some(0.4));
    }

    #[test]
    fn test_iteration_is_date_ordered() {
        let items = vec![item(day(9), 1, 0.1), item(day(3), 1, 0.2), item(day(6), 1, 0.3)];
        let series = SentimentSeries::from_items(&items);

        let dates: Vec<NaiveDate> = series.iter().map(|(date, _)| date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
        assert_eq!(series.len(), 7);
    }
}
