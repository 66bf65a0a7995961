//! Entry point tying the partitioner, a rainfall source and the tables together.

use crate::config::RunConfig;
use crate::dataset::assembler::DatasetAssembler;
use crate::dataset::error::DatasetError;
use crate::dataset::tables::{write_actual_points, write_grid_points, DatasetPaths};
use crate::error::RainfallGridError;
use crate::grid::partition::{partition, GridPartition};
use crate::map::render::plot_map;
use crate::rainfall::source::RainfallSource;
use crate::rainfall::source_for;
use crate::types::grid_point::RainfallPoint;
use crate::utils::ensure_output_dir_exists;
use log::info;
use std::path::{Path, PathBuf};
use tokio::task;

/// What a completed [`RainfallGrid::generate_datasets`] run produced.
#[derive(Debug, Clone)]
pub struct GeneratedDatasets {
    pub partition: GridPartition,
    /// Cell centres with their readings, in the same order as `partition.inner`.
    pub actual_points: Vec<RainfallPoint>,
    pub paths: DatasetPaths,
}

impl GeneratedDatasets {
    /// Number of cells whose provider lookup failed.
    pub fn unavailable(&self) -> usize {
        self.actual_points
            .iter()
            .filter(|p| !p.rainfall.is_available())
            .count()
    }
}

/// Runs the full dataset pipeline for one [`RunConfig`].
///
/// # Examples
///
/// ```no_run
/// # use chrono::NaiveDate;
/// # use rainfall_grid::{BoundingBox, DateRange, RainfallGrid, RainfallGridError, RunConfig};
/// # #[tokio::main]
/// # async fn main() -> Result<(), RainfallGridError> {
/// let period = DateRange::new(
///     NaiveDate::from_ymd_opt(2022, 7, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2022, 7, 31).unwrap(),
/// )?;
/// let config = RunConfig::builder()
///     .bounding_box(BoundingBox::new(19.5, 73.5, 18.5, 72.5))
///     .period(period)
///     .api_key(std::env::var("RAINFALL_GRID_API_KEY").unwrap_or_default())
///     .build();
///
/// let datasets = RainfallGrid::new(config)?.generate_datasets().await?;
/// println!("{} cells written to {}", datasets.actual_points.len(), datasets.paths.actual_points.display());
/// # Ok(())
/// # }
/// ```
pub struct RainfallGrid {
    config: RunConfig,
    source: Box<dyn RainfallSource>,
}

impl RainfallGrid {
    /// Builds the HTTP client for the configured provider.
    ///
    /// # Errors
    ///
    /// Returns [`RainfallGridError::Config`] if the HTTP client cannot be built.
    pub fn new(config: RunConfig) -> Result<Self, RainfallGridError> {
        let source = source_for(
            config.provider,
            &config.api_key,
            config.base_url.as_deref(),
            config.request_timeout,
        )?;
        Ok(Self { config, source })
    }

    /// Uses `source` instead of the configured provider.
    pub fn with_source(config: RunConfig, source: Box<dyn RainfallSource>) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Partitions the configured bounding box without touching the network.
    pub fn partition(&self) -> Result<GridPartition, RainfallGridError> {
        Ok(partition(
            &self.config.bounding_box,
            self.config.cell_spec(),
        )?)
    }

    /// Partitions the box, fetches rainfall for every cell centre and writes
    /// `grid_points.csv` and `actual_points.csv` into the output directory.
    ///
    /// # Errors
    ///
    /// Fails with [`RainfallGridError::Grid`] for a degenerate box before any
    /// request is made, and with [`RainfallGridError::Dataset`] if the output
    /// directory or a table cannot be written. Provider failures are not
    /// errors; they show up as unavailable readings.
    pub async fn generate_datasets(&self) -> Result<GeneratedDatasets, RainfallGridError> {
        let partition = self.partition()?;
        info!(
            "Generated {} grid points and {} rainfall points",
            partition.border.len(),
            partition.inner.len()
        );

        let actual_points = DatasetAssembler::new(self.source.as_ref(), self.config.concurrency)
            .assemble(&partition.inner, &self.config.period)
            .await;

        ensure_output_dir_exists(&self.config.output_dir).await?;
        let paths = DatasetPaths::in_dir(&self.config.output_dir);

        let border = partition.border.clone();
        let grid_path = paths.grid_points.clone();
        let actual = actual_points.clone();
        let actual_path = paths.actual_points.clone();
        task::spawn_blocking(move || {
            write_grid_points(&grid_path, &border)?;
            info!("Wrote {} rows to {}", border.len(), grid_path.display());
            write_actual_points(&actual_path, &actual)?;
            info!("Wrote {} rows to {}", actual.len(), actual_path.display());
            Ok::<(), DatasetError>(())
        })
        .await
        .map_err(DatasetError::from)??;

        Ok(GeneratedDatasets {
            partition,
            actual_points,
            paths,
        })
    }

    /// Renders the tables in the configured output directory to an HTML map
    /// at `output`, with the default zoom and legend label.
    pub fn render_map(&self, output: &Path) -> Result<PathBuf, RainfallGridError> {
        Ok(plot_map()
            .input_dir(&self.config.output_dir)
            .output(output)
            .call()?)
    }
}
