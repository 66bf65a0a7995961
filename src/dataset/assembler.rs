//! Attaches a rainfall reading to every cell centre.

use crate::rainfall::source::RainfallSource;
use crate::types::date_range::DateRange;
use crate::types::grid_point::{GridPoint, RainfallPoint, RainfallReading};
use futures_util::stream::{self, StreamExt};
use log::{info, warn};

/// Queries a [`RainfallSource`] once per point with at most `concurrency`
/// requests in flight.
pub struct DatasetAssembler<'a> {
    source: &'a dyn RainfallSource,
    concurrency: usize,
}

impl<'a> DatasetAssembler<'a> {
    /// `concurrency` is clamped to at least one request.
    pub fn new(source: &'a dyn RainfallSource, concurrency: usize) -> Self {
        Self {
            source,
            concurrency: concurrency.max(1),
        }
    }

    /// Returns one [`RainfallPoint`] per input point, in input order.
    ///
    /// A failed lookup is logged and recorded as [`RainfallReading::Unavailable`];
    /// it never affects the other points.
    pub async fn assemble(&self, inner: &[GridPoint], period: &DateRange) -> Vec<RainfallPoint> {
        info!(
            "Fetching rainfall for {} points from {} ({} to {}, {} at a time)",
            inner.len(),
            self.source.provider(),
            period.start,
            period.end,
            self.concurrency
        );

        let source = self.source;
        let mut slots: Vec<Option<RainfallReading>> = vec![None; inner.len()];
        let mut readings = stream::iter(inner.iter().enumerate())
            .map(|(index, point)| async move {
                let reading = match source.total_rainfall(point, period).await {
                    Ok(mm) => RainfallReading::Measured(mm),
                    Err(e) => {
                        warn!(
                            "Rainfall unavailable for {} at {}: {}",
                            point.name,
                            point.query_location(),
                            e
                        );
                        RainfallReading::Unavailable
                    }
                };
                (index, reading)
            })
            .buffer_unordered(self.concurrency);

        while let Some((index, reading)) = readings.next().await {
            slots[index] = Some(reading);
        }

        let points: Vec<RainfallPoint> = inner
            .iter()
            .zip(slots)
            .map(|(point, reading)| RainfallPoint {
                point: point.clone(),
                rainfall: reading.unwrap_or(RainfallReading::Unavailable),
            })
            .collect();

        let unavailable = points.iter().filter(|p| !p.rainfall.is_available()).count();
        if unavailable > 0 {
            warn!(
                "{} of {} points have no rainfall reading",
                unavailable,
                points.len()
            );
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rainfall::error::ProviderError;
    use crate::rainfall::world_weather_online::WorldWeatherOnline;
    use crate::types::provider::Provider;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn july() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2022, 7, 1).unwrap(),
            NaiveDate::from_ymd_opt(2022, 7, 31).unwrap(),
        )
        .unwrap()
    }

    fn points(n: usize) -> Vec<GridPoint> {
        (0..n)
            .map(|i| GridPoint::new(format!("LatLon0-{i}"), 10.0, i as f64))
            .collect()
    }

    /// Returns the longitude as the rainfall total; earlier points answer
    /// later so completions arrive out of order. Fails for longitude 2.
    struct SlowEchoSource {
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl SlowEchoSource {
        fn new() -> Self {
            Self {
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl RainfallSource for SlowEchoSource {
        fn provider(&self) -> Provider {
            Provider::WorldWeatherOnline
        }

        async fn total_rainfall(
            &self,
            point: &GridPoint,
            _period: &DateRange,
        ) -> Result<f64, ProviderError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(60 - 10 * point.lon as u64)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            if point.lon == 2.0 {
                return Err(ProviderError::Api {
                    location: point.query_location(),
                    message: "boom".to_string(),
                });
            }
            Ok(point.lon)
        }
    }

    #[tokio::test]
    async fn output_order_matches_input_regardless_of_completion_order() {
        let source = SlowEchoSource::new();
        let inner = points(5);
        let result = DatasetAssembler::new(&source, 4).assemble(&inner, &july()).await;

        assert_eq!(result.len(), 5);
        for (i, p) in result.iter().enumerate() {
            assert_eq!(p.point, inner[i]);
            if i == 2 {
                assert_eq!(p.rainfall, RainfallReading::Unavailable);
            } else {
                assert_eq!(p.rainfall, RainfallReading::Measured(i as f64));
            }
        }
        let max = source.max_in_flight.load(Ordering::SeqCst);
        assert!(max <= 4 && max > 1, "max in flight {max}");
    }

    #[tokio::test]
    async fn zero_concurrency_runs_sequentially() {
        let source = SlowEchoSource::new();
        let result = DatasetAssembler::new(&source, 0)
            .assemble(&points(3), &july())
            .await;
        assert_eq!(result.len(), 3);
        assert_eq!(source.max_in_flight.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_input_gives_empty_output() {
        let source = SlowEchoSource::new();
        let result = DatasetAssembler::new(&source, 2).assemble(&[], &july()).await;
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn http_500_for_one_point_leaves_the_others_untouched() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "10,1"))
            .respond_with(ResponseTemplate::new(500))
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "weather": [{ "hourly": [{ "precipMM": "3.5" }] }] }
            })))
            .mount(&server)
            .await;

        let source =
            WorldWeatherOnline::with_base_url("k", server.uri(), Duration::from_secs(5)).unwrap();
        let result = DatasetAssembler::new(&source, 1)
            .assemble(&points(3), &july())
            .await;

        assert_eq!(result[0].rainfall, RainfallReading::Measured(3.5));
        assert_eq!(result[1].rainfall, RainfallReading::Unavailable);
        assert_eq!(result[2].rainfall, RainfallReading::Measured(3.5));
    }
}
