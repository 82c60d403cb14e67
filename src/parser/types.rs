//! Common types for parsers

use std::collections::HashMap;

/// Package name to raw specifier, scoped to one manifest file
pub type DependencyTable = HashMap<String, String>;

/// Package name to concrete version, flattened from a workspace descriptor's catalogs
pub type CatalogTable = HashMap<String, String>;

const WORKSPACE_PREFIX: &str = "workspace:";
const CATALOG_PREFIX: &str = "catalog:";

/// Syntactic class of a version specifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSpecifier<'a> {
    /// Plain version (`1.2.3`)
    Exact(&'a str),
    /// Version behind a single leading operator character (`^1.2.3`, `~1.2.3`)
    RangePrefixed { prefix: char, version: &'a str },
    /// Another package of the same workspace (`workspace:*`)
    WorkspaceLinked,
    /// Version defined in the workspace catalog (`catalog:`, `catalog:react18`)
    CatalogLinked,
}

impl<'a> VersionSpecifier<'a> {
    /// Classify a raw specifier.
    ///
    /// Only the prefix is inspected: `workspace:` and `catalog:` first, then whether the
    /// first character is a digit. An empty specifier is treated as exact.
    pub fn classify(spec: &'a str) -> Self {
        if spec.starts_with(WORKSPACE_PREFIX) {
            return VersionSpecifier::WorkspaceLinked;
        }
        if spec.starts_with(CATALOG_PREFIX) {
            return VersionSpecifier::CatalogLinked;
        }

        match spec.chars().next() {
            Some(prefix) if !prefix.is_ascii_digit() => VersionSpecifier::RangePrefixed {
                prefix,
                version: &spec[prefix.len_utf8()..],
            },
            _ => VersionSpecifier::Exact(spec),
        }
    }

    pub fn is_workspace(spec: &str) -> bool {
        spec.starts_with(WORKSPACE_PREFIX)
    }
}
