//! Common types for the version layer

use std::collections::HashMap;

use serde::Deserialize;

/// Metadata of one package as published on the registry
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct PackageMetadata {
    #[serde(default)]
    pub name: String,
    /// Distribution tags ("latest", "next", ...) mapped to versions
    #[serde(rename = "dist-tags", default)]
    pub dist_tags: HashMap<String, String>,
}

impl PackageMetadata {
    pub fn new(name: &str, dist_tags: HashMap<String, String>) -> Self {
        Self {
            name: name.to_string(),
            dist_tags,
        }
    }

    /// Version the "latest" dist-tag points at
    pub fn latest(&self) -> Option<&str> {
        self.dist_tags.get("latest").map(String::as_str)
    }
}
