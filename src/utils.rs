use crate::dataset::error::DatasetError;
use log::info;
use std::io;
use std::path::Path;

pub async fn ensure_output_dir_exists(path: &Path) -> Result<(), DatasetError> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => {
            if !metadata.is_dir() {
                return Err(DatasetError::NotADirectory(path.to_path_buf()));
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("Creating output directory: {}", path.display());
            tokio::fs::create_dir_all(path)
                .await
                .map_err(|e| DatasetError::OutputDirCreation(path.to_path_buf(), e))
        }
        Err(e) => Err(DatasetError::OutputDirCreation(path.to_path_buf(), e)),
    }
}
