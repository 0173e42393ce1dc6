//! Mapping request targets onto the document root.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs::File;

use crate::config::StaticFilesConfig;
use crate::http::response::StatusCode;

/// The directory files are served from.
#[derive(Debug, Clone)]
pub struct DocumentRoot {
    root: PathBuf,
    index: String,
}

/// A file opened for a 200 response.
#[derive(Debug)]
pub struct OpenedFile {
    pub file: File,
    pub len: u64,
    pub path: PathBuf,
}

impl DocumentRoot {
    pub fn new(root: impl Into<PathBuf>, index: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            index: index.into(),
        }
    }

    pub fn from_config(cfg: &StaticFilesConfig) -> Self {
        Self::new(cfg.root.clone(), cfg.index.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a request target to a path. Never fails.
    ///
    /// `/` maps to the index document; anything else is appended to the root
    /// as-is, without normalisation.
    pub fn resolve(&self, target: &str) -> PathBuf {
        if target == "/" {
            return self.root.join(&self.index);
        }

        let mut path = self.root.clone().into_os_string();
        path.push(target);
        PathBuf::from(path)
    }

    /// Resolves and opens `target`.
    ///
    /// Permission errors map to 403 and every other failure to 404. A path
    /// that canonicalises to somewhere outside the root is refused with 403.
    pub async fn open(&self, target: &str) -> Result<OpenedFile, StatusCode> {
        let path = self.resolve(target);

        let real = tokio::fs::canonicalize(&path).await.map_err(open_status)?;
        let root = tokio::fs::canonicalize(&self.root).await.map_err(open_status)?;
        if !real.starts_with(&root) {
            tracing::warn!(request_target = %target, path = %real.display(), "Target escapes document root");
            return Err(StatusCode::Forbidden);
        }

        let file = File::open(&real).await.map_err(open_status)?;
        let meta = file.metadata().await.map_err(open_status)?;
        if !meta.is_file() {
            return Err(StatusCode::NotFound);
        }

        Ok(OpenedFile {
            file,
            len: meta.len(),
            path,
        })
    }
}

fn open_status(err: io::Error) -> StatusCode {
    match err.kind() {
        io::ErrorKind::PermissionDenied => StatusCode::Forbidden,
        _ => StatusCode::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_target_is_index() {
        let docroot = DocumentRoot::new("./www", "index.html");
        assert_eq!(docroot.resolve("/"), PathBuf::from("./www/index.html"));
    }

    #[test]
    fn other_targets_are_appended_verbatim() {
        let docroot = DocumentRoot::new("./www", "index.html");
        assert_eq!(docroot.resolve("/a/b.txt"), PathBuf::from("./www/a/b.txt"));
        assert_eq!(docroot.resolve("/../x"), PathBuf::from("./www/../x"));
    }

    #[test]
    fn permission_denied_is_forbidden() {
        assert_eq!(
            open_status(io::ErrorKind::PermissionDenied.into()),
            StatusCode::Forbidden
        );
        assert_eq!(open_status(io::ErrorKind::NotFound.into()), StatusCode::NotFound);
        assert_eq!(open_status(io::ErrorKind::InvalidInput.into()), StatusCode::NotFound);
    }
}
