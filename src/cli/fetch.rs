//! Weight fetch command

use std::path::PathBuf;

use anyhow::Result;

use crate::config::env_or_default;
use crate::fetch::maybe_download;
use crate::timing::StageTimer;

/// Ensure the named files exist locally, downloading the missing ones.
pub async fn fetch(remote: String, files: Vec<String>, output: Option<PathBuf>) -> Result<()> {
    let output_dir = output
        .unwrap_or_else(|| PathBuf::from(env_or_default("HALTR_WEIGHTS_DIR", "./weights")));

    let mut timer = StageTimer::new("fetch");
    let dir = maybe_download(&output_dir, Some(&remote), &files).await?;
    timer.log(&format!(
        "ensured {} file(s) in {}",
        files.len(),
        dir.display()
    ));

    println!("Weights ready in: {}", dir.display());
    Ok(())
}
