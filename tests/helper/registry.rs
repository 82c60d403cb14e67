//! Registry test utilities

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use npm_check::version::error::RegistryError;
use npm_check::version::registry::Registry;
use npm_check::version::types::PackageMetadata;

/// Mock registry answering from a fixed latest-version table and counting calls
pub struct MockRegistry {
    latest: HashMap<String, String>,
    delay: Duration,
    calls: Mutex<HashMap<String, usize>>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self {
            latest: HashMap::new(),
            delay: Duration::ZERO,
            calls: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_latest(mut self, package: &str, version: &str) -> Self {
        self.latest.insert(package.to_string(), version.to_string());
        self
    }

    /// Delay every answer, so concurrent requests overlap
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls_for(&self, package: &str) -> usize {
        self.calls.lock().unwrap().get(package).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl Registry for MockRegistry {
    async fn fetch_package(&self, package_name: &str) -> Result<PackageMetadata, RegistryError> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(package_name.to_string())
            .or_default() += 1;

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match self.latest.get(package_name) {
            Some(version) => Ok(PackageMetadata::new(
                package_name,
                HashMap::from([("latest".to_string(), version.clone())]),
            )),
            None => Err(RegistryError::NotFound(package_name.to_string())),
        }
    }
}
