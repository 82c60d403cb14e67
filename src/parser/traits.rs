//! Parser trait definition

/// Trait for parsing dependency-bearing files
pub trait Parser {
    /// What the parser extracts from a file
    type Output;

    /// Parse the content and extract the dependency information
    fn parse(&self, content: &str) -> Result<Self::Output, ParseError>;
}

/// Error type for parsing operations
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// package.json is not valid JSON or has the wrong shape
    #[error("Error parsing package.json: {0}")]
    Json(#[from] serde_json::Error),

    /// pnpm-workspace.yaml is not valid YAML or has the wrong shape
    #[error("Error parsing pnpm-workspace.yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
