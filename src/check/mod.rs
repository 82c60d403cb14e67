//! Check layer: turns a project tree (or a list of names) into a report
//!
//! # Modules
//!
//! - [`lister`]: Finds package.json files and the workspace descriptor
//! - [`aggregator`]: Reads manifests into per-file dependency tables
//! - [`catalog`]: Builds the pnpm catalog table
//! - [`render`]: Formats per-file reports as aligned text
//! - [`runner`]: Drives one invocation end to end

pub mod aggregator;
pub mod catalog;
pub mod lister;
pub mod render;
pub mod runner;

pub use lister::{FileLister, Listing, WalkLister};
pub use runner::CheckRun;
