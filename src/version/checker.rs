//! Version comparison for the dependencies of one manifest

use crate::parser::types::{CatalogTable, DependencyTable, VersionSpecifier};
use crate::version::cache::MetadataCache;

/// An outdated dependency, ready to be rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutdatedDependency {
    pub name: String,
    /// Version declared by the manifest (catalog entries show the catalog's version)
    pub current_version: String,
    /// Latest published version, carrying the declared range operator if there was one
    pub latest_version: String,
    /// The manifest pointed at the workspace catalog
    pub from_catalog: bool,
}

/// Status of one declared dependency
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionStatus {
    /// Linked to another workspace package; never compared
    Workspace,
    /// Declared version equals the latest one
    Latest,
    /// A newer version is published
    Outdated(OutdatedDependency),
    /// No metadata (or no "latest" tag) for the package
    NotFound,
    /// `catalog:` specifier without a matching catalog entry
    NotInCatalog,
}

/// One line of a file's report, in package-name order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEntry {
    Outdated(OutdatedDependency),
    NotFound(String),
    NotInCatalog(String),
}

/// Result of checking every dependency of one manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReport {
    /// Number of dependencies declared by the manifest, including skipped ones
    pub declared: usize,
    pub entries: Vec<ReportEntry>,
}

impl FileReport {
    pub fn outdated(&self) -> impl Iterator<Item = &OutdatedDependency> {
        self.entries.iter().filter_map(|entry| match entry {
            ReportEntry::Outdated(dependency) => Some(dependency),
            _ => None,
        })
    }
}

/// Compare one declared dependency against the fetched metadata
pub fn compare_version(
    cache: &MetadataCache,
    catalog: &CatalogTable,
    package_name: &str,
    specifier: &str,
) -> VersionStatus {
    let from_catalog = match VersionSpecifier::classify(specifier) {
        VersionSpecifier::WorkspaceLinked => return VersionStatus::Workspace,
        VersionSpecifier::CatalogLinked => true,
        _ => false,
    };

    let current_version = if from_catalog {
        match catalog.get(package_name) {
            Some(version) => version.as_str(),
            None => return VersionStatus::NotInCatalog,
        }
    } else {
        specifier
    };

    let Some(metadata) = cache.get(package_name) else {
        return VersionStatus::NotFound;
    };
    let Some(latest) = metadata.latest() else {
        return VersionStatus::NotFound;
    };

    let latest_version = match VersionSpecifier::classify(current_version) {
        VersionSpecifier::RangePrefixed { prefix, version } => {
            if version == latest {
                return VersionStatus::Latest;
            }
            format!("{prefix}{latest}")
        }
        _ => {
            if current_version == latest {
                return VersionStatus::Latest;
            }
            latest.to_string()
        }
    };

    VersionStatus::Outdated(OutdatedDependency {
        name: package_name.to_string(),
        current_version: current_version.to_string(),
        latest_version,
        from_catalog,
    })
}

/// Check every dependency of one manifest.
///
/// Must run after the cache has been filled for every name the manifest declares.
pub fn check_file(
    cache: &MetadataCache,
    catalog: &CatalogTable,
    dependencies: &DependencyTable,
) -> FileReport {
    let mut sorted: Vec<(&String, &String)> = dependencies.iter().collect();
    sorted.sort_by(|(a, _), (b, _)| a.cmp(b));

    let entries = sorted
        .into_iter()
        .filter_map(
            |(name, specifier)| match compare_version(cache, catalog, name, specifier) {
                VersionStatus::Workspace | VersionStatus::Latest => None,
                VersionStatus::Outdated(dependency) => Some(ReportEntry::Outdated(dependency)),
                VersionStatus::NotFound => Some(ReportEntry::NotFound(name.clone())),
                VersionStatus::NotInCatalog => Some(ReportEntry::NotInCatalog(name.clone())),
            },
        )
        .collect();

    FileReport {
        declared: dependencies.len(),
        entries,
    }
}
