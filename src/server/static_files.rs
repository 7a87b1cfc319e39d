use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure modes of resolving a URL path to file content.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The resolved path does not name a regular file. Answered with 404.
    #[error("no regular file at {0}")]
    NotFound(PathBuf),

    /// Any other filesystem failure; closes the session.
    #[error("filesystem error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

/// Resolves request URLs to files under a configured root directory.
///
/// Resolution joins the process working directory, the root directory and
/// the URL path as-is. There is no path-traversal sanitization here; callers
/// rely on client-side URL validation, which is a known gap of the baseline
/// design.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    fn resolve_path(&self, url_path: &str) -> PathBuf {
        let mut path = self.root.clone();
        // URL paths lead with '/'; joining that directly would discard the
        // root, so strip it first.
        path.push(url_path.trim_start_matches('/'));
        path
    }

    /// Reads the whole file named by `url_path` in one shot.
    ///
    /// The bytes are owned by the caller and dropped after the response is
    /// built; nothing is cached across requests.
    pub async fn resolve(&self, url_path: &str) -> Result<Vec<u8>, ResourceError> {
        let path = self.resolve_path(url_path);
        let is_file = tokio::fs::metadata(&path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !is_file {
            return Err(ResourceError::NotFound(path));
        }
        Ok(tokio::fs::read(&path).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn scratch_root(name: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!("staticd-test-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();
        root
    }

    #[tokio::test]
    async fn serves_existing_file_bytes() {
        let root = scratch_root("existing");
        std::fs::write(root.join("index.html"), "<h1>hi</h1>").unwrap();

        let files = StaticFiles::new(&root);
        let bytes = files.resolve("/index.html").await.unwrap();
        assert_eq!(bytes, b"<h1>hi</h1>");
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let root = scratch_root("missing");
        let files = StaticFiles::new(&root);
        assert!(matches!(
            files.resolve("/nope.html").await,
            Err(ResourceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn directory_is_not_found() {
        let root = scratch_root("dir");
        std::fs::create_dir_all(root.join("sub.html")).unwrap();
        let files = StaticFiles::new(&root);
        assert!(matches!(
            files.resolve("/sub.html").await,
            Err(ResourceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn repeated_resolution_is_identical() {
        let root = scratch_root("repeat");
        std::fs::write(root.join("a.html"), "stable").unwrap();

        let files = StaticFiles::new(&root);
        let first = files.resolve("/a.html").await.unwrap();
        let second = files.resolve("/a.html").await.unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn nested_url_joins_under_root() {
        let files = StaticFiles::new("www");
        let path = files.resolve_path("/docs/page.html");
        assert_eq!(path, Path::new("www").join("docs").join("page.html"));
    }
}
