//! Parser layer
//! - traits.rs: Parser trait definition
//! - types.rs: Common types (DependencyTable, CatalogTable, VersionSpecifier)
//! - package_json.rs: package.json parser
//! - pnpm_workspace.rs: pnpm-workspace.yaml catalog parser

pub mod package_json;
pub mod pnpm_workspace;
pub mod traits;
pub mod types;

pub use package_json::PackageJsonParser;
pub use pnpm_workspace::PnpmWorkspaceParser;
pub use traits::{ParseError, Parser};
pub use types::{CatalogTable, DependencyTable, VersionSpecifier};
