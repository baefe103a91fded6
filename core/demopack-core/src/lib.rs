//! demopack-core: bundles a directory of demo scripts into one generated file
//!
//! The playground loads its demos from a single generated script that
//! assigns a list of `{name, content}` records to a global variable. This
//! crate produces that list.
//!
//! ## Pipeline
//!
//! **Discovery**: walk the root and keep regular files whose name ends with
//! the configured suffix (`.js` by default).
//!
//! **Encoding**: read each file whole and encode its bytes as base64, so any
//! content survives being embedded in a JavaScript string.
//!
//! **Rendering**: serialize the records as compact JSON and wrap them in a
//! `var demos = ...;` statement, or emit plain JSON / NDJSON.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use demopack_core::bundle::{bundle, BundleOptions};
//! use demopack_core::output::write_assignment;
//!
//! let records = bundle(Path::new("demos"), &BundleOptions::default())?;
//! write_assignment(&records, "demos", std::io::stdout())?;
//! #
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! Any filesystem error aborts the whole run; there is no partial output.
//!
//! ---
//!
//! Made by FontLab https://www.fontlab.com/

pub mod bundle;
pub mod discovery;
pub mod encode;
pub mod output;
