//! Version management layer for package version checking
//!
//! This module fetches package metadata from the npm registry, caches it for the
//! duration of a run, and compares declared versions against the latest ones.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Registry  │────▶│    Cache    │◀────│   Checker   │
//! │  (fetch)    │     │ (dedup map) │     │  (compare)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │  Registries │
//! │    (npm)    │
//! └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`cache`]: Per-run metadata cache and concurrent fetch coordination
//! - [`checker`]: Version comparison and per-file report assembly
//! - [`registry`]: Registry trait for fetching metadata from remote sources
//! - [`registries`]: Concrete registry implementations (npm)
//! - [`error`]: Error types for every fatal condition of a run
//! - [`types`]: Common types like `PackageMetadata`

pub mod cache;
pub mod checker;
pub mod error;
pub mod registries;
pub mod registry;
pub mod types;
