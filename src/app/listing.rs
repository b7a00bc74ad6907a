//! Release directory listing
//!
//! Produces the names of the entries in a release directory as a single-pass
//! async stream. Entry order is whatever the filesystem returns.

use std::path::{Path, PathBuf};

use futures::stream::{self, Stream};
use tokio::fs;
use tracing::debug;

use crate::errors::{ScanError, ScanResult};

/// Open a directory and stream the names of its entries
///
/// Opening the directory happens eagerly so a missing or unreadable directory
/// fails before any entry is yielded. Names that are not valid UTF-8 can never
/// match a firmware filename and are skipped.
pub async fn stream_entry_names(
    dir: &Path,
) -> ScanResult<impl Stream<Item = ScanResult<String>>> {
    let read_dir = fs::read_dir(dir)
        .await
        .map_err(|source| ScanError::DirectoryUnreadable {
            path: dir.to_path_buf(),
            source,
        })?;

    let dir = dir.to_path_buf();
    Ok(stream::unfold(
        Some((read_dir, dir)),
        |state: Option<(fs::ReadDir, PathBuf)>| async move {
            let (mut read_dir, dir) = state?;
            loop {
                match read_dir.next_entry().await {
                    Ok(Some(entry)) => match entry.file_name().into_string() {
                        Ok(name) => return Some((Ok(name), Some((read_dir, dir)))),
                        Err(raw) => {
                            debug!("Skipping non UTF-8 entry: {:?}", raw);
                            continue;
                        }
                    },
                    Ok(None) => return None,
                    Err(source) => {
                        let err = ScanError::DirectoryUnreadable {
                            path: dir.clone(),
                            source,
                        };
                        return Some((Err(err), None));
                    }
                }
            }
        },
    ))
}

/// Collect all entry names of a directory
pub async fn list_entry_names(dir: &Path) -> ScanResult<Vec<String>> {
    use futures::TryStreamExt;

    let names = stream_entry_names(dir).await?.try_collect().await?;
    Ok(names)
}
