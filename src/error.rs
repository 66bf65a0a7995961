use crate::config::ConfigError;
use crate::dataset::error::DatasetError;
use crate::grid::error::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RainfallGridError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
