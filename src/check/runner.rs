//! One invocation of the checker

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::check::aggregator::ManifestAggregator;
use crate::check::catalog::resolve_catalog;
use crate::check::lister::FileLister;
use crate::check::render::render_file_report;
use crate::parser::types::CatalogTable;
use crate::version::cache::MetadataCache;
use crate::version::checker::check_file;
use crate::version::error::CheckError;
use crate::version::registry::Registry;

/// State shared by every step of one run: the registry and the metadata it fetched
pub struct CheckRun {
    registry: Arc<dyn Registry>,
    cache: MetadataCache,
}

impl CheckRun {
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self {
            registry,
            cache: MetadataCache::new(),
        }
    }

    pub fn cache(&self) -> &MetadataCache {
        &self.cache
    }

    /// Print the latest version of each named package, in the order given
    pub async fn check_packages<W: Write>(
        &self,
        package_names: &[String],
        out: &mut W,
    ) -> Result<(), CheckError> {
        self.cache
            .fetch_all(self.registry.as_ref(), package_names)
            .await?;

        for name in package_names {
            match self.cache.get(name).as_deref().and_then(|m| m.latest()) {
                Some(latest) => writeln!(out, "{name} {latest}")?,
                None => writeln!(out, "Package not found: {name}")?,
            }
        }

        Ok(())
    }

    /// Report outdated dependencies of every manifest under `root`
    pub async fn check_directory<W: Write>(
        &self,
        lister: &dyn FileLister,
        root: &Path,
        update: bool,
        out: &mut W,
    ) -> Result<(), CheckError> {
        let listing = lister.list(root)?;

        if listing.manifests.is_empty() {
            writeln!(out, "No package.json files found")?;
            return Ok(());
        }

        let aggregation = ManifestAggregator::new().aggregate(&listing.manifests)?;
        let catalog = match &listing.workspace_descriptor {
            Some(descriptor) => resolve_catalog(descriptor)?,
            None => CatalogTable::new(),
        };

        writeln!(out, "Fetching dependencies...")?;
        writeln!(out)?;
        out.flush()?;

        let names = aggregation.names_to_fetch();
        self.cache
            .fetch_all(self.registry.as_ref(), &names)
            .await?;
        info!(
            "Fetched metadata for {} packages across {} manifests",
            names.len(),
            aggregation.files().len()
        );

        for (index, file) in aggregation.files().iter().enumerate() {
            if index > 0 {
                writeln!(out)?;
            }

            writeln!(out, "File: {}", file.path.display())?;
            let report = check_file(&self.cache, &catalog, &file.dependencies);
            for line in render_file_report(&report) {
                writeln!(out, "{line}")?;
            }
        }

        if update {
            writeln!(out, "Updating packages")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    use crate::check::lister::Listing;
    use crate::version::error::{ListError, RegistryError};
    use crate::version::registry::MockRegistry;
    use crate::version::types::PackageMetadata;

    struct FixedLister(Listing);

    impl FileLister for FixedLister {
        fn list(&self, _root: &Path) -> Result<Listing, ListError> {
            Ok(self.0.clone())
        }
    }

    fn latest(name: &str, version: &str) -> PackageMetadata {
        PackageMetadata::new(
            name,
            HashMap::from([("latest".to_string(), version.to_string())]),
        )
    }

    fn output(buffer: Vec<u8>) -> String {
        String::from_utf8(buffer).unwrap()
    }

    #[tokio::test]
    async fn check_packages_prints_latest_in_request_order() {
        let mut registry = MockRegistry::new();
        registry
            .expect_fetch_package()
            .times(2)
            .returning(|name| match name {
                "react" => Ok(latest("react", "18.3.1")),
                _ => Ok(latest(name, "4.17.21")),
            });

        let run = CheckRun::new(Arc::new(registry));
        let mut out = Vec::new();
        run.check_packages(
            &["react".to_string(), "lodash".to_string(), "react".to_string()],
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(
            output(out),
            "react 18.3.1\nlodash 4.17.21\nreact 18.3.1\n"
        );
    }

    #[tokio::test]
    async fn check_packages_fails_for_unknown_package() {
        let mut registry = MockRegistry::new();
        registry
            .expect_fetch_package()
            .returning(|name| Err(RegistryError::NotFound(name.to_string())));

        let run = CheckRun::new(Arc::new(registry));
        let mut out = Vec::new();
        let result = run
            .check_packages(&["no-such-package".to_string()], &mut out)
            .await;

        assert!(matches!(
            result,
            Err(CheckError::Registry(RegistryError::NotFound(_)))
        ));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn check_directory_without_manifests_reports_and_succeeds() {
        let registry = MockRegistry::new();
        let run = CheckRun::new(Arc::new(registry));
        let mut out = Vec::new();

        run.check_directory(
            &FixedLister(Listing::default()),
            Path::new("."),
            false,
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(output(out), "No package.json files found\n");
    }

    #[tokio::test]
    async fn check_directory_fails_before_fetching_on_bad_manifest() {
        let registry = MockRegistry::new();
        let run = CheckRun::new(Arc::new(registry));
        let mut out = Vec::new();

        let result = run
            .check_directory(
                &FixedLister(Listing {
                    manifests: vec![PathBuf::from("/definitely/missing/package.json")],
                    workspace_descriptor: None,
                }),
                Path::new("/definitely/missing"),
                false,
                &mut out,
            )
            .await;

        assert!(matches!(result, Err(CheckError::Read { .. })));
        assert!(run.cache().is_empty());
    }
}
