//! pnpm-workspace.yaml catalog parser

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::parser::traits::{ParseError, Parser};
use crate::parser::types::CatalogTable;

/// The parts of a pnpm-workspace.yaml this tool reads
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct PnpmWorkspace {
    /// Workspace package globs; discovery is done by the file lister instead
    pub packages: Vec<String>,
    /// Default catalog (`catalog:`)
    pub catalog: CatalogTable,
    /// Named catalogs (`catalogs: { react18: {...} }`)
    pub catalogs: BTreeMap<String, CatalogTable>,
}

impl PnpmWorkspace {
    /// Flatten the default catalog and every named catalog into one table.
    ///
    /// Named catalogs are applied after the default one in catalog-name order, so a
    /// package listed in several catalogs resolves to the last of them.
    pub fn into_catalog_table(self) -> CatalogTable {
        let mut table = self.catalog;
        for (catalog_name, entries) in self.catalogs {
            debug!(
                "Merging catalog {} ({} entries)",
                catalog_name,
                entries.len()
            );
            table.extend(entries);
        }
        table
    }
}

/// Parser for pnpm-workspace.yaml catalog files
pub struct PnpmWorkspaceParser;

impl Parser for PnpmWorkspaceParser {
    type Output = CatalogTable;

    fn parse(&self, content: &str) -> Result<CatalogTable, ParseError> {
        // An empty document is a valid (empty) workspace
        if content.trim().is_empty() {
            return Ok(CatalogTable::new());
        }

        let workspace: PnpmWorkspace = serde_yaml::from_str(content).inspect_err(|e| {
            warn!("Failed to parse pnpm-workspace.yaml: {}", e);
        })?;

        Ok(workspace.into_catalog_table())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_extracts_single_catalog_entries() {
        let content = r#"packages:
  - "packages/*"
catalog:
  react: ^18.2.0
  lodash: ^4.17.21
"#;
        let result = PnpmWorkspaceParser.parse(content).unwrap();
        assert_eq!(
            result,
            CatalogTable::from([
                ("react".to_string(), "^18.2.0".to_string()),
                ("lodash".to_string(), "^4.17.21".to_string()),
            ])
        );
    }

    #[test]
    fn parse_flattens_named_catalogs() {
        let content = r#"catalogs:
  react17:
    react: ^17.0.2
  tooling:
    typescript: 5.3.3
"#;
        let result = PnpmWorkspaceParser.parse(content).unwrap();
        assert_eq!(
            result,
            CatalogTable::from([
                ("react".to_string(), "^17.0.2".to_string()),
                ("typescript".to_string(), "5.3.3".to_string()),
            ])
        );
    }

    #[test]
    fn parse_named_catalog_overrides_default_catalog() {
        let content = r#"catalog:
  react: ^18.2.0
  lodash: 4.17.21
catalogs:
  legacy:
    react: ^16.14.0
"#;
        let result = PnpmWorkspaceParser.parse(content).unwrap();
        assert_eq!(result.get("react").map(String::as_str), Some("^16.14.0"));
        assert_eq!(result.get("lodash").map(String::as_str), Some("4.17.21"));
    }

    #[test]
    fn parse_applies_named_catalogs_in_name_order() {
        let content = r#"catalogs:
  zeta:
    react: ^19.0.0
  alpha:
    react: ^17.0.2
"#;
        let result = PnpmWorkspaceParser.parse(content).unwrap();
        assert_eq!(result.get("react").map(String::as_str), Some("^19.0.0"));
    }

    #[test]
    fn parse_returns_empty_table_without_catalogs() {
        let content = "packages:\n  - apps/*\n  - packages/*\n";
        let result = PnpmWorkspaceParser.parse(content).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn parse_returns_empty_table_for_empty_file() {
        assert!(PnpmWorkspaceParser.parse("").unwrap().is_empty());
    }

    #[test]
    fn parse_fails_on_invalid_yaml() {
        let result = PnpmWorkspaceParser.parse("catalog: [unclosed\n");
        assert!(matches!(result, Err(ParseError::Yaml(_))));
    }
}
