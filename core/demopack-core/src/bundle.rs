//! Record model and the scan-encode pipeline (made by FontLab https://www.fontlab.com/)

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::discovery::{normalize, PathDiscovery, ScriptDiscovery, DEFAULT_SUFFIX};
use crate::encode::{decode_content, encode_file};

/// One bundled script: its root-relative name and base64 content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub name: String,
    pub content: String,
}

impl FileRecord {
    /// Decode `content` back into the original file bytes.
    pub fn decoded(&self) -> Result<Vec<u8>> {
        decode_content(&self.content)
    }
}

/// How records are ordered in the bundle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecordOrder {
    /// Byte-wise order of `name`; stable across runs and platforms.
    #[default]
    Sorted,
    /// Whatever order the filesystem walk produced.
    Traversal,
}

#[derive(Debug, Clone)]
pub struct BundleOptions {
    pub suffix: String,
    pub follow_symlinks: bool,
    pub order: RecordOrder,
    /// Files never bundled, such as the generated output itself.
    pub exclude: Vec<PathBuf>,
}

impl Default for BundleOptions {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_SUFFIX.to_string(),
            follow_symlinks: false,
            order: RecordOrder::default(),
            exclude: Vec::new(),
        }
    }
}

/// Enumerate, normalize and encode every matching script under `root`.
///
/// The first failure aborts the run; no partial bundle is returned.
pub fn bundle(root: &Path, opts: &BundleOptions) -> Result<Vec<FileRecord>> {
    let discovery = PathDiscovery::new(root)
        .suffix(opts.suffix.clone())
        .follow_symlinks(opts.follow_symlinks)
        .exclude(opts.exclude.iter().cloned());
    let sources = discovery.discover()?;

    let mut records = Vec::with_capacity(sources.len());
    for source in sources {
        let name = normalize(&source.path, discovery.root())?;
        let content = encode_file(&source.path)?;
        debug!(%name, encoded_len = content.len(), "bundled script");
        records.push(FileRecord { name, content });
    }

    if opts.order == RecordOrder::Sorted {
        records.sort_by(|a, b| a.name.cmp(&b.name));
    }

    info!(
        root = %root.display(),
        count = records.len(),
        "collected scripts"
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn default_options_match_js_and_sort() {
        let opts = BundleOptions::default();
        assert_eq!(opts.suffix, ".js");
        assert!(!opts.follow_symlinks);
        assert_eq!(opts.order, RecordOrder::Sorted);
        assert!(opts.exclude.is_empty());
    }

    #[test]
    fn excluded_output_is_not_bundled() {
        let tmp = tempdir().expect("tempdir");
        fs::write(tmp.path().join("a.js"), b"a").expect("write");
        fs::write(tmp.path().join("bundle.js"), b"var demos = [];").expect("write");

        let opts = BundleOptions {
            exclude: vec![tmp.path().join("bundle.js")],
            ..BundleOptions::default()
        };
        let records = bundle(tmp.path(), &opts).expect("bundle");
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(names, vec!["a.js"]);
    }

    #[test]
    fn sorted_order_is_by_name() {
        let tmp = tempdir().expect("tempdir");
        fs::create_dir_all(tmp.path().join("a")).expect("mkdir");
        fs::write(tmp.path().join("b.js"), b"b").expect("write");
        fs::write(tmp.path().join("a.js"), b"a").expect("write");
        fs::write(tmp.path().join("a/x.js"), b"ax").expect("write");

        let records = bundle(tmp.path(), &BundleOptions::default()).expect("bundle");
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(names, vec!["a.js", "a/x.js", "b.js"]);
    }

    #[test]
    fn traversal_order_keeps_every_record() {
        let tmp = tempdir().expect("tempdir");
        fs::write(tmp.path().join("one.js"), b"1").expect("write");
        fs::write(tmp.path().join("two.js"), b"2").expect("write");

        let opts = BundleOptions {
            order: RecordOrder::Traversal,
            ..BundleOptions::default()
        };
        let mut names: Vec<String> = bundle(tmp.path(), &opts)
            .expect("bundle")
            .into_iter()
            .map(|r| r.name)
            .collect();
        names.sort();

        assert_eq!(names, vec!["one.js", "two.js"]);
    }

    #[test]
    fn record_decodes_to_original_bytes() {
        let record = FileRecord {
            name: "a.js".into(),
            content: "eA==".into(),
        };
        assert_eq!(record.decoded().unwrap(), b"x");
    }
}
