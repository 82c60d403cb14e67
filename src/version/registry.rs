//! Registry trait for fetching package metadata from a remote source

#[cfg(test)]
use mockall::automock;

use crate::version::error::RegistryError;
use crate::version::types::PackageMetadata;

/// Trait for fetching package metadata from a registry
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Fetches the metadata for a single package
    ///
    /// # Arguments
    /// * `package_name` - The name of the package (e.g., "lodash", "@types/node")
    ///
    /// # Returns
    /// * `Ok(PackageMetadata)` - Name and dist-tags of the package
    /// * `Err(RegistryError)` - If the fetch fails; every failure is fatal to a run
    async fn fetch_package(&self, package_name: &str) -> Result<PackageMetadata, RegistryError>;
}
