//! Workspace catalog resolution

use std::path::Path;

use tracing::info;

use crate::parser::pnpm_workspace::PnpmWorkspaceParser;
use crate::parser::traits::Parser;
use crate::parser::types::CatalogTable;
use crate::version::error::CheckError;

/// Build the catalog table from a pnpm-workspace.yaml.
///
/// Both an unreadable and an unparsable descriptor end the run.
pub fn resolve_catalog(descriptor: &Path) -> Result<CatalogTable, CheckError> {
    let content = std::fs::read_to_string(descriptor).map_err(|source| CheckError::Read {
        path: descriptor.to_path_buf(),
        source,
    })?;

    let catalog = PnpmWorkspaceParser
        .parse(&content)
        .map_err(|source| CheckError::Parse {
            path: descriptor.to_path_buf(),
            source,
        })?;

    info!(
        "Loaded {} catalog entries from {}",
        catalog.len(),
        descriptor.display()
    );
    Ok(catalog)
}
