//! package.json parser

use serde::Deserialize;
use tracing::warn;

use crate::parser::traits::{ParseError, Parser};
use crate::parser::types::DependencyTable;

/// The parts of a package.json this tool reads
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PackageJson {
    pub name: Option<String>,
    pub dependencies: DependencyTable,
    pub dev_dependencies: DependencyTable,
    pub optional_dependencies: DependencyTable,
    pub peer_dependencies: DependencyTable,
}

impl PackageJson {
    /// Merge the four dependency buckets into one table.
    ///
    /// Buckets are applied in the order direct, dev, optional, peer; a name declared in
    /// more than one bucket keeps the specifier from the last of them.
    pub fn into_dependency_table(self) -> DependencyTable {
        let mut merged = self.dependencies;
        merged.extend(self.dev_dependencies);
        merged.extend(self.optional_dependencies);
        merged.extend(self.peer_dependencies);
        merged
    }
}

/// Parser for package.json files
pub struct PackageJsonParser;

impl PackageJsonParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PackageJsonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for PackageJsonParser {
    type Output = DependencyTable;

    fn parse(&self, content: &str) -> Result<DependencyTable, ParseError> {
        let manifest: PackageJson = serde_json::from_str(content).inspect_err(|e| {
            warn!("Failed to parse package.json: {}", e);
        })?;

        Ok(manifest.into_dependency_table())
    }
}
