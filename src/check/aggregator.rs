//! Dependency aggregation across manifests

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::parser::package_json::PackageJsonParser;
use crate::parser::traits::Parser;
use crate::parser::types::{DependencyTable, VersionSpecifier};
use crate::version::error::CheckError;

/// Merged dependencies of one manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestDependencies {
    pub path: PathBuf,
    pub dependencies: DependencyTable,
}

/// Dependencies of every discovered manifest, in listing order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    files: Vec<ManifestDependencies>,
}

impl Aggregation {
    pub fn files(&self) -> &[ManifestDependencies] {
        &self.files
    }

    /// Merge every per-file table into one.
    ///
    /// Later files win on collision, except that a `workspace:` specifier never displaces
    /// a registry one: a name published on the registry and linked locally elsewhere must
    /// still be fetched.
    pub fn global_dependencies(&self) -> DependencyTable {
        let mut global = DependencyTable::new();
        for file in &self.files {
            for (name, specifier) in &file.dependencies {
                let keeps_registry_entry = VersionSpecifier::is_workspace(specifier)
                    && global
                        .get(name)
                        .is_some_and(|existing| !VersionSpecifier::is_workspace(existing));
                if !keeps_registry_entry {
                    global.insert(name.clone(), specifier.clone());
                }
            }
        }
        global
    }

    /// Names that have to be fetched from the registry
    pub fn names_to_fetch(&self) -> BTreeSet<String> {
        self.global_dependencies()
            .into_iter()
            .filter(|(_, specifier)| !VersionSpecifier::is_workspace(specifier))
            .map(|(name, _)| name)
            .collect()
    }
}

/// Reads manifests and builds their dependency tables
pub struct ManifestAggregator {
    parser: PackageJsonParser,
}

impl ManifestAggregator {
    pub fn new() -> Self {
        Self {
            parser: PackageJsonParser::new(),
        }
    }

    /// Read one manifest; unreadable or unparsable files end the run
    pub fn read_manifest(&self, path: &Path) -> Result<ManifestDependencies, CheckError> {
        let content = std::fs::read_to_string(path).map_err(|source| CheckError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let dependencies = self
            .parser
            .parse(&content)
            .map_err(|source| CheckError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(
            "Read {} dependencies from {}",
            dependencies.len(),
            path.display()
        );

        Ok(ManifestDependencies {
            path: path.to_path_buf(),
            dependencies,
        })
    }

    pub fn aggregate(&self, paths: &[PathBuf]) -> Result<Aggregation, CheckError> {
        let files = paths
            .iter()
            .map(|path| self.read_manifest(path))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Aggregation { files })
    }
}

impl Default for ManifestAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    fn names(set: &BTreeSet<String>) -> Vec<&str> {
        set.iter().map(String::as_str).collect()
    }

    #[test]
    fn aggregate_keeps_per_file_specifiers() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let app = write(
            root,
            "apps/web/package.json",
            r#"{ "dependencies": { "react": "^18.2.0", "lodash": "4.17.20" } }"#,
        );
        let lib = write(
            root,
            "packages/ui/package.json",
            r#"{ "peerDependencies": { "react": ">=16.8.0" } }"#,
        );

        let aggregation = ManifestAggregator::new()
            .aggregate(&[app.clone(), lib.clone()])
            .unwrap();

        let files = aggregation.files();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, app);
        assert_eq!(files[0].dependencies["react"], "^18.2.0");
        assert_eq!(files[1].path, lib);
        assert_eq!(files[1].dependencies["react"], ">=16.8.0");

        assert_eq!(aggregation.global_dependencies()["react"], ">=16.8.0");
        assert_eq!(names(&aggregation.names_to_fetch()), vec!["lodash", "react"]);
    }

    #[test]
    fn names_to_fetch_excludes_workspace_links() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(
            temp_dir.path(),
            "package.json",
            r#"{
  "dependencies": { "@acme/ui": "workspace:*", "lodash": "catalog:" },
  "devDependencies": { "@acme/config": "workspace:^" }
}"#,
        );

        let aggregation = ManifestAggregator::new().aggregate(&[path]).unwrap();

        assert_eq!(names(&aggregation.names_to_fetch()), vec!["lodash"]);
    }

    #[test]
    fn names_to_fetch_keeps_name_linked_locally_in_a_later_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let consumer = write(
            root,
            "apps/site/package.json",
            r#"{ "dependencies": { "shared-utils": "^2.0.0" } }"#,
        );
        let linked = write(
            root,
            "apps/admin/package.json",
            r#"{ "dependencies": { "shared-utils": "workspace:*" } }"#,
        );

        let aggregation = ManifestAggregator::new()
            .aggregate(&[consumer, linked])
            .unwrap();

        assert_eq!(names(&aggregation.names_to_fetch()), vec!["shared-utils"]);
    }

    #[test]
    fn aggregate_fails_on_unreadable_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let result =
            ManifestAggregator::new().aggregate(&[temp_dir.path().join("package.json")]);
        assert!(matches!(result, Err(CheckError::Read { .. })));
    }

    #[test]
    fn aggregate_fails_on_invalid_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(temp_dir.path(), "package.json", "{ invalid");

        let result = ManifestAggregator::new().aggregate(&[path.clone()]);

        match result {
            Err(CheckError::Parse { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
