//! File cache keyed by resolved absolute path.
//!
//! One `SourceIndex` lives for one analysis pass. Every file is read from disk
//! at most once; later requests are served from the cache. Nothing is written.

use std::cell::{Cell, RefCell};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use contour_core::config::ContourConfig;
use contour_core::errors::IndexError;
use contour_core::types::collections::FxHashMap;
use ignore::WalkBuilder;

/// Read-only, caching view over a repository tree.
#[derive(Debug)]
pub struct SourceIndex {
    root: PathBuf,
    cache: RefCell<FxHashMap<PathBuf, Arc<str>>>,
    disk_reads: Cell<usize>,
}

impl SourceIndex {
    /// Open an index rooted at `root`. Fails if the root is not a directory.
    pub fn open(root: &Path) -> Result<Self, IndexError> {
        let root = root.canonicalize().map_err(|e| io_error(root, e))?;
        if !root.is_dir() {
            return Err(IndexError::NotFound { path: root });
        }
        Ok(Self {
            root,
            cache: RefCell::new(FxHashMap::default()),
            disk_reads: Cell::new(0),
        })
    }

    /// Canonical repository root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute, lexically normalized form of `path` (relative paths are
    /// taken from the root). Does not touch the filesystem.
    pub fn absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            normalize_lexically(path)
        } else {
            normalize_lexically(&self.root.join(path))
        }
    }

    /// Resolve `path` to the canonical absolute path used as the cache key.
    pub fn resolve(&self, path: &Path) -> Result<PathBuf, IndexError> {
        let absolute = self.absolute(path);
        if !absolute.starts_with(&self.root) {
            return Err(IndexError::OutsideRoot { path: absolute });
        }
        let resolved = absolute.canonicalize().map_err(|e| io_error(&absolute, e))?;
        if !resolved.starts_with(&self.root) {
            return Err(IndexError::OutsideRoot { path: resolved });
        }
        Ok(resolved)
    }

    /// Read a file's text, failing with `IndexError::NotFound` when absent.
    pub fn read_text(&self, path: impl AsRef<Path>) -> Result<Arc<str>, IndexError> {
        let resolved = self.resolve(path.as_ref())?;
        if let Some(text) = self.cache.borrow().get(&resolved) {
            return Ok(Arc::clone(text));
        }

        let bytes = std::fs::read(&resolved).map_err(|e| io_error(&resolved, e))?;
        self.disk_reads.set(self.disk_reads.get() + 1);
        let text: Arc<str> = Arc::from(String::from_utf8_lossy(&bytes).into_owned());
        tracing::trace!(file = %resolved.display(), bytes = bytes.len(), "read source");

        self.cache.borrow_mut().insert(resolved, Arc::clone(&text));
        Ok(text)
    }

    /// Like `read_text`, but absence (or any read failure) yields `None`.
    pub fn maybe_read_text(&self, path: impl AsRef<Path>) -> Option<Arc<str>> {
        match self.read_text(path.as_ref()) {
            Ok(text) => Some(text),
            Err(e) if e.is_not_found() => {
                tracing::debug!(file = %path.as_ref().display(), "optional input absent");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "unreadable input treated as absent");
                None
            }
        }
    }

    pub fn is_file(&self, path: impl AsRef<Path>) -> bool {
        self.resolve(path.as_ref()).is_ok_and(|p| p.is_file())
    }

    pub fn is_dir(&self, path: impl AsRef<Path>) -> bool {
        self.resolve(path.as_ref()).is_ok_and(|p| p.is_dir())
    }

    /// Files under `dir` whose extension is in `extensions`, sorted.
    /// Hidden entries are skipped. A missing directory yields an empty list.
    pub fn list_files(&self, dir: impl AsRef<Path>, extensions: &[String]) -> Vec<PathBuf> {
        let dir = match self.resolve(dir.as_ref()) {
            Ok(d) if d.is_dir() => d,
            _ => {
                tracing::debug!(dir = %dir.as_ref().display(), "directory absent");
                return Vec::new();
            }
        };

        let walker = WalkBuilder::new(&dir)
            .standard_filters(false)
            .hidden(true)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        let mut files: Vec<PathBuf> = walker
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
            .map(|entry| entry.into_path())
            .filter(|path| {
                path.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|ext| extensions.iter().any(|x| x == ext))
            })
            .collect();
        files.sort();
        files
    }

    /// Root-relative display form with `/` separators.
    pub fn relative(&self, path: &Path) -> String {
        let absolute = self.absolute(path);
        let rel = absolute.strip_prefix(&self.root).unwrap_or(&absolute);
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Number of files read from disk so far.
    pub fn disk_reads(&self) -> usize {
        self.disk_reads.get()
    }

    /// Number of distinct files held in the cache.
    pub fn cached_files(&self) -> usize {
        self.cache.borrow().len()
    }

    // ---- Typed helpers over the configured layout ----

    pub fn route_modules(&self, config: &ContourConfig) -> Vec<PathBuf> {
        self.list_files(
            config.layout.effective_routes_dir(),
            &config.extraction.effective_source_extensions(),
        )
    }

    pub fn service_modules(&self, config: &ContourConfig) -> Vec<PathBuf> {
        self.list_files(
            config.layout.effective_services_dir(),
            &config.extraction.effective_source_extensions(),
        )
    }

    pub fn schema_files(&self, config: &ContourConfig) -> Vec<PathBuf> {
        self.list_files(config.layout.effective_schema_dir(), &["sql".to_string()])
    }

    pub fn wiring_file(&self, config: &ContourConfig) -> PathBuf {
        self.absolute(Path::new(config.layout.effective_wiring_file()))
    }

    pub fn client_file(&self, config: &ContourConfig) -> PathBuf {
        self.absolute(Path::new(config.layout.effective_client_file()))
    }
}

/// Collapse `.` and `..` components without consulting the filesystem.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn io_error(path: &Path, source: std::io::Error) -> IndexError {
    if source.kind() == std::io::ErrorKind::NotFound {
        IndexError::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        IndexError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexical_normalization_collapses_dots() {
        assert_eq!(
            normalize_lexically(Path::new("/repo/backend/src/./routes/../routes/a.ts")),
            PathBuf::from("/repo/backend/src/routes/a.ts")
        );
    }
}
