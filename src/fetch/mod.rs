//! Weight fetching via the external `pget` tool.
//!
//! Determines which expected files are absent from a local directory and
//! fetches each missing one from a remote base location, fully in parallel.
//! Transfer mechanics live entirely in `pget`; this module only orchestrates
//! the processes.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use futures::future::try_join_all;
use tokio::process::Command;

/// Expected files not present in `dir`, in the order given.
///
/// A directory that does not exist yet is missing everything.
pub fn missing_files(dir: &Path, expected: &[String]) -> Result<Vec<String>> {
    if !dir.exists() {
        return Ok(expected.to_vec());
    }
    let mut local = HashSet::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to list {}", dir.display()))?
    {
        local.insert(entry?.file_name().to_string_lossy().into_owned());
    }
    Ok(expected
        .iter()
        .filter(|name| !local.contains(name.as_str()))
        .cloned()
        .collect())
}

/// Fetch a single remote file to `dest` with `pget`.
pub async fn download_file(remote_url: &str, dest: &Path) -> Result<()> {
    tracing::info!("Downloading {}", remote_url);

    let output = Command::new("pget")
        .arg(remote_url)
        .arg(dest)
        .output()
        .await
        .with_context(|| format!("failed to spawn pget for {}", remote_url))?;

    if !output.stdout.is_empty() {
        tracing::debug!("pget stdout: {}", String::from_utf8_lossy(&output.stdout).trim());
    }
    if !output.stderr.is_empty() {
        tracing::debug!("pget stderr: {}", String::from_utf8_lossy(&output.stderr).trim());
    }

    if !output.status.success() {
        bail!(
            "pget failed for {}: {}",
            remote_url,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(())
}

/// Fetch every named file from `remote_base` into `dir`, all in parallel.
pub async fn download_files(remote_base: &str, dir: &Path, files: &[String]) -> Result<()> {
    try_join_all(files.iter().map(|name| {
        let remote = format!("{}/{}", remote_base, name);
        let dest = dir.join(name);
        async move { download_file(&remote, &dest).await }
    }))
    .await?;
    Ok(())
}

/// Ensure `dir` holds every expected file, downloading the missing ones.
///
/// With no remote base this is a no-op; otherwise the directory is created
/// if absent, missing files are computed by listing it, and only those are
/// fetched. Returns the local directory either way. A trailing `/` on the
/// remote base is tolerated.
pub async fn maybe_download(
    dir: impl AsRef<Path>,
    remote_base: Option<&str>,
    files: &[String],
) -> Result<PathBuf> {
    let dir = dir.as_ref().to_path_buf();
    let Some(remote_base) = remote_base else {
        return Ok(dir);
    };
    let remote_base = remote_base.trim_end_matches('/');

    let missing = if dir.exists() {
        missing_files(&dir, files)?
    } else {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        files.to_vec()
    };

    if missing.is_empty() {
        tracing::debug!("All {} file(s) already present in {}", files.len(), dir.display());
        return Ok(dir);
    }

    tracing::info!(
        "Downloading {} missing file(s) from {} to {}",
        missing.len(),
        remote_base,
        dir.display()
    );
    let start = Instant::now();
    download_files(remote_base, &dir, &missing).await?;
    tracing::info!("Finished download in {:.2}s", start.elapsed().as_secs_f64());

    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_missing_files_diff() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), "{}").unwrap();
        std::fs::write(dir.path().join("tokenizer.json"), "{}").unwrap();

        let expected = names(&["config.json", "model.safetensors", "tokenizer.json"]);
        let missing = missing_files(dir.path(), &expected).unwrap();
        assert_eq!(missing, names(&["model.safetensors"]));
    }

    #[test]
    fn test_missing_files_for_absent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("weights");
        let expected = names(&["a.bin", "b.bin"]);
        assert_eq!(missing_files(&absent, &expected).unwrap(), expected);
    }

    #[tokio::test]
    async fn test_maybe_download_without_remote_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("weights");
        let out = maybe_download(&absent, None, &names(&["a.bin"])).await.unwrap();
        assert_eq!(out, absent);
        // No remote means nothing is created either.
        assert!(!absent.exists());
    }

    #[tokio::test]
    async fn test_maybe_download_with_everything_present() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.bin"), "x").unwrap();
        // No pget invocation happens when nothing is missing, so a bogus
        // remote is never contacted.
        let out = maybe_download(dir.path(), Some("gs://bucket/model/"), &names(&["a.bin"]))
            .await
            .unwrap();
        assert_eq!(out, dir.path());
    }
}
