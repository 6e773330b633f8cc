use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::Level;

use crate::utils::{Error, MovieDataResult};

pub fn init_logging(config: &crate::config::Config) {
    tracing_subscriber::fmt()
        .with_max_level(Level::from_str(&config.logs.level).unwrap_or(Level::INFO))
        .init();
}

pub fn ensure_output_dir(config: &crate::config::Config) -> MovieDataResult<PathBuf> {
    let output_dir = PathBuf::from(&config.data.output_dir);
    if output_dir.exists() {
        if !output_dir.is_dir() {
            return Err(Error::Other(format!(
                "Configured output_dir '{}' exists but is not a directory",
                output_dir.display()
            )));
        }
        return Ok(output_dir);
    }

    std::fs::create_dir_all(&output_dir)?;
    tracing::info!("Created output_dir directory: '{}'", output_dir.display());
    Ok(output_dir)
}

/// `<output_dir>/<input stem>_<suffix>.csv`
pub fn output_path(output_dir: &Path, input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("table");
    output_dir.join(format!("{stem}_{suffix}.csv"))
}
