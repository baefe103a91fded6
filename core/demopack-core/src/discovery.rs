//! Script discovery helpers for demopack-core (made by FontLab https://www.fontlab.com/)

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Suffix used when none is configured.
pub const DEFAULT_SUFFIX: &str = ".js";

/// Path to a candidate script file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSourceRef {
    pub path: PathBuf,
}

/// Trait for enumerating scripts from some backing store.
pub trait ScriptDiscovery {
    fn discover(&self) -> Result<Vec<ScriptSourceRef>>;
}

/// Recursive filesystem walker that collects regular files ending with a suffix.
#[derive(Debug, Clone)]
pub struct PathDiscovery {
    root: PathBuf,
    suffix: String,
    follow_symlinks: bool,
    exclude: Vec<PathBuf>,
}

impl PathDiscovery {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            suffix: DEFAULT_SUFFIX.to_string(),
            follow_symlinks: false,
            exclude: Vec::new(),
        }
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Skip these files even when they match; compared after resolving
    /// symlinks and relative components. Paths that do not exist are ignored.
    pub fn exclude<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.exclude = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ScriptDiscovery for PathDiscovery {
    /// Walks the root and returns matches in raw traversal order.
    fn discover(&self) -> Result<Vec<ScriptSourceRef>> {
        let root = &self.root;
        if !root.exists() {
            return Err(anyhow!("root path does not exist: {}", root.display()));
        }
        if !root.is_dir() {
            return Err(anyhow!("root is not a directory: {}", root.display()));
        }

        let excluded: Vec<PathBuf> = self
            .exclude
            .iter()
            .filter_map(|p| fs::canonicalize(p).ok())
            .collect();

        let mut found = Vec::new();
        for entry in WalkDir::new(root).follow_links(self.follow_symlinks) {
            let entry = entry.with_context(|| format!("walking {}", root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            if !matches_suffix(entry.path(), &self.suffix) {
                trace!(path = %entry.path().display(), "skipping non-matching file");
            } else if is_excluded(entry.path(), &excluded) {
                debug!(path = %entry.path().display(), "skipping excluded file");
            } else {
                found.push(ScriptSourceRef {
                    path: entry.path().to_path_buf(),
                });
            }
        }

        Ok(found)
    }
}

fn is_excluded(path: &Path, excluded: &[PathBuf]) -> bool {
    if excluded.is_empty() {
        return false;
    }
    match fs::canonicalize(path) {
        Ok(resolved) => excluded.contains(&resolved),
        Err(_) => false,
    }
}

/// Case-sensitive suffix test against the file name only.
fn matches_suffix(path: &Path, suffix: &str) -> bool {
    match path.file_name() {
        Some(name) => name.to_string_lossy().ends_with(suffix),
        None => false,
    }
}

/// Turn an enumerated path into a record name relative to `root`.
///
/// Components are joined with `/` regardless of platform, and the root
/// prefix (with its separator) never appears in the result.
pub fn normalize(path: &Path, root: &Path) -> Result<String> {
    let relative = path.strip_prefix(root).map_err(|_| {
        anyhow!(
            "{} is not located under root {}",
            path.display(),
            root.display()
        )
    })?;

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                let part = part
                    .to_str()
                    .ok_or_else(|| anyhow!("path is not valid UTF-8: {}", path.display()))?;
                parts.push(part);
            }
            Component::CurDir => {}
            other => {
                return Err(anyhow!(
                    "unexpected component {:?} in {}",
                    other,
                    path.display()
                ))
            }
        }
    }

    if parts.is_empty() {
        return Err(anyhow!("{} names the root itself", path.display()));
    }

    Ok(parts.join("/"))
}
