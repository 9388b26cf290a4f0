use crate::ingest::types::{ChartResult, QuoteSeries};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub price: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockQuote {
    pub symbol: String,
    pub current_price: Option<f64>,
    pub previous_close: Option<f64>,
    pub currency: Option<String>,
    pub data: Vec<ChartPoint>,
}

impl StockQuote {
    pub fn from_chart_result(result: &ChartResult) -> Self {
        let empty = QuoteSeries::default();
        let series = result.indicators.quote.first().unwrap_or(&empty);

        Self {
            symbol: result.meta.symbol.clone(),
            current_price: result.meta.regular_market_price,
            previous_close: result
                .meta
                .previous_close
                .or(result.meta.chart_previous_close),
            currency: result.meta.currency.clone(),
            data: map_chart_points(&result.timestamp, series),
        }
    }
}

/// Zips the provider's parallel arrays into rows. Missing entries read as 0,
/// and rows without a positive close are dropped.
pub fn map_chart_points(timestamps: &[i64], series: &QuoteSeries) -> Vec<ChartPoint> {
    let at = |values: &[Option<f64>], idx: usize| values.get(idx).copied().flatten().unwrap_or(0.0);

    timestamps
        .iter()
        .enumerate()
        .filter_map(|(idx, &ts)| {
            let date = DateTime::from_timestamp(ts, 0)?.date_naive();
            let price = at(&series.close, idx);
            if price <= 0.0 {
                return None;
            }
            Some(ChartPoint {
                date,
                price,
                open: at(&series.open, idx),
                high: at(&series.high, idx),
                low: at(&series.low, idx),
                volume: series.volume.get(idx).copied().flatten().unwrap_or(0),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::types::ChartEnvelope;
    use serde_json::json;

    fn series(close: Vec<Option<f64>>) -> QuoteSeries {
        let n = close.len();
        QuoteSeries {
            open: vec![Some(1.0); n],
            high: vec![Some(2.0); n],
            low: vec![Some(0.5); n],
            close,
            volume: vec![Some(10); n],
        }
    }

    #[test]
    fn drops_non_positive_prices_and_keeps_order() {
        // 2024-01-01 .. 2024-01-05, midnight UTC.
        let ts: Vec<i64> = (0..5).map(|d| 1_704_067_200 + d * 86_400).collect();
        let s = series(vec![Some(3.0), Some(0.0), Some(-1.0), None, Some(4.0)]);

        let points = map_chart_points(&ts, &s);

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(points[0].price, 3.0);
        assert_eq!(points[1].date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(points[1].price, 4.0);
    }

    #[test]
    fn short_arrays_default_to_zero() {
        let ts = vec![1_704_067_200, 1_704_153_600];
        let s = QuoteSeries {
            close: vec![Some(5.0), Some(6.0)],
            open: vec![Some(4.5)],
            ..QuoteSeries::default()
        };

        let points = map_chart_points(&ts, &s);

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].open, 4.5);
        assert_eq!(points[1].open, 0.0);
        assert_eq!(points[1].volume, 0);
    }

    #[test]
    fn date_is_utc_calendar_day() {
        // 2024-03-10 23:30 UTC
        let s = series(vec![Some(1.0)]);
        let points = map_chart_points(&[1_710_113_400], &s);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
    }

    #[test]
    fn quote_falls_back_to_chart_previous_close() {
        let v = json!({
            "chart": {"result": [{
                "meta": {"symbol": "MSFT", "regularMarketPrice": 410.0, "chartPreviousClose": 400.0, "currency": "USD"},
                "timestamp": [1704067200],
                "indicators": {"quote": [{"close": [405.0], "open": [401.0], "high": [406.0], "low": [399.0], "volume": [1000]}]}
            }]}
        });
        let env: ChartEnvelope = serde_json::from_value(v).unwrap();
        let quote = StockQuote::from_chart_result(&env.chart.result.unwrap()[0]);

        assert_eq!(quote.symbol, "MSFT");
        assert_eq!(quote.previous_close, Some(400.0));
        assert_eq!(quote.data.len(), 1);

        let out = serde_json::to_value(&quote).unwrap();
        assert_eq!(out["currentPrice"], json!(410.0));
        assert_eq!(out["data"][0]["date"], json!("2024-01-01"));
    }
}
