//! In-memory package metadata cache shared by every fetch of a run
//!
//! Each package name owns one slot. The first caller to see a name missing claims the
//! slot while holding the lock, then performs the network call with the lock released.
//! Later callers for the same name wait on the slot instead of fetching again, so a
//! name hits the registry at most once per cache.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::try_join_all;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::version::error::RegistryError;
use crate::version::registry::Registry;
use crate::version::types::PackageMetadata;

type Slot = Arc<watch::Sender<Option<Arc<PackageMetadata>>>>;

/// Outcome of looking a name up before fetching it
enum Claim {
    /// Metadata is already present
    Ready,
    /// Another caller is fetching; wait for it to publish
    Wait(watch::Receiver<Option<Arc<PackageMetadata>>>),
    /// This caller owns the fetch
    Fetch(ClaimGuard),
}

/// Ownership of a pending slot.
///
/// Dropping the guard without publishing (failed or cancelled fetch) removes the slot,
/// which closes the channel and wakes every waiter with an error.
struct ClaimGuard {
    slots: Arc<Mutex<HashMap<String, Slot>>>,
    name: String,
    slot: Slot,
    published: bool,
}

impl ClaimGuard {
    fn publish(mut self, metadata: PackageMetadata) {
        self.slot.send_replace(Some(Arc::new(metadata)));
        self.published = true;
    }
}

impl Drop for ClaimGuard {
    fn drop(&mut self) {
        if self.published {
            return;
        }

        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        if slots
            .get(&self.name)
            .is_some_and(|slot| Arc::ptr_eq(slot, &self.slot))
        {
            debug!("Releasing unfinished claim on {}", self.name);
            slots.remove(&self.name);
        }
    }
}

/// Package name to fetched metadata, constructed once per run
#[derive(Default)]
pub struct MetadataCache {
    slots: Arc<Mutex<HashMap<String, Slot>>>,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the slot table; a panic in another holder leaves the map consistent
    fn lock_slots(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn claim(&self, package_name: &str) -> Claim {
        let mut slots = self.lock_slots();

        if let Some(slot) = slots.get(package_name) {
            if slot.borrow().is_some() {
                return Claim::Ready;
            }
            return Claim::Wait(slot.subscribe());
        }

        let (sender, _) = watch::channel(None);
        let slot = Arc::new(sender);
        slots.insert(package_name.to_string(), slot.clone());

        Claim::Fetch(ClaimGuard {
            slots: Arc::clone(&self.slots),
            name: package_name.to_string(),
            slot,
            published: false,
        })
    }

    /// Get fetched metadata for a package, if present
    pub fn get(&self, package_name: &str) -> Option<Arc<PackageMetadata>> {
        self.lock_slots()
            .get(package_name)
            .and_then(|slot| slot.borrow().clone())
    }

    /// Store metadata directly, replacing anything held for the same name
    pub fn insert(&self, metadata: PackageMetadata) {
        let (sender, _) = watch::channel(Some(Arc::new(metadata.clone())));
        let previous = self.lock_slots().insert(metadata.name.clone(), Arc::new(sender));

        // Wake anyone waiting on a pending slot that was just replaced
        if let Some(previous) = previous {
            previous.send_replace(Some(Arc::new(metadata)));
        }
    }

    /// Number of packages with metadata available
    pub fn len(&self) -> usize {
        self.lock_slots()
            .values()
            .filter(|slot| slot.borrow().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make sure metadata for one package is present, fetching it if nobody has
    async fn fetch_one(
        &self,
        registry: &dyn Registry,
        package_name: &str,
    ) -> Result<(), RegistryError> {
        match self.claim(package_name) {
            Claim::Ready => {
                debug!("Cache hit for {}", package_name);
                Ok(())
            }
            Claim::Wait(mut receiver) => {
                debug!("Waiting for in-flight fetch of {}", package_name);
                receiver
                    .wait_for(Option::is_some)
                    .await
                    .map(|_| ())
                    .map_err(|_| RegistryError::Abandoned(package_name.to_string()))
            }
            Claim::Fetch(guard) => {
                let metadata = registry.fetch_package(package_name).await?;
                info!(
                    "Fetched {} (latest {})",
                    package_name,
                    metadata.latest().unwrap_or("-")
                );
                guard.publish(metadata);
                Ok(())
            }
        }
    }

    /// Fetch every name that is not cached yet, concurrently, and wait for all of them.
    ///
    /// Duplicate names are collapsed. The first failure is returned and the remaining
    /// fetches of this call are dropped.
    pub async fn fetch_all<I, S>(&self, registry: &dyn Registry, names: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let unique: BTreeSet<String> = names
            .into_iter()
            .map(|name| name.as_ref().to_string())
            .collect();

        debug!("Fetching metadata for {} packages", unique.len());

        try_join_all(unique.iter().map(|name| self.fetch_one(registry, name))).await?;

        Ok(())
    }
}
