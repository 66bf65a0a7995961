use crate::rainfall::error::ProviderError;
use crate::types::date_range::DateRange;
use crate::types::grid_point::GridPoint;
use crate::types::provider::Provider;
use async_trait::async_trait;

/// Anything that can total the rainfall at a coordinate over a date range.
#[async_trait]
pub trait RainfallSource: Send + Sync {
    fn provider(&self) -> Provider;

    /// Total precipitation at `point` over `period`, in millimetres.
    async fn total_rainfall(
        &self,
        point: &GridPoint,
        period: &DateRange,
    ) -> Result<f64, ProviderError>;
}
