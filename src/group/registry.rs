//! Group Registry
//!
//! Holds every group of the process by name. Groups are written once, at
//! creation, and looked up on every peer request; the sharded map keeps those
//! lookups from contending with each other or with the occasional creation.

use anyhow::Result;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::future::Future;
use std::sync::Arc;

use super::group::Group;
use super::types::{GroupReport, getter_fn};
use crate::error::CacheError;

pub struct GroupRegistry {
    groups: DashMap<String, Arc<Group>>,
}

impl GroupRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Creates a group and registers it under `name`.
    ///
    /// # Arguments
    /// * `name` - Unique group name; peers address the group by it.
    /// * `cache_bytes` - Byte budget of the group's local cache (0 = unbounded).
    /// * `getter` - Source-load callback invoked on a full miss.
    ///
    /// # Returns
    /// * `Err(CacheError::GroupExists)` if the name is taken.
    pub fn create<F, Fut>(
        &self,
        name: &str,
        cache_bytes: i64,
        getter: F,
    ) -> Result<Arc<Group>, CacheError>
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<u8>>> + Send + 'static,
    {
        match self.groups.entry(name.to_string()) {
            Entry::Occupied(_) => Err(CacheError::GroupExists(name.to_string())),
            Entry::Vacant(slot) => {
                let group = Arc::new(Group::with_getter(name, cache_bytes, getter_fn(getter)));
                slot.insert(group.clone());
                tracing::info!("Created group {} ({} bytes)", name, cache_bytes);
                Ok(group)
            }
        }
    }

    /// Looks up a group by name.
    pub fn get(&self, name: &str) -> Option<Arc<Group>> {
        self.groups.get(name).map(|entry| entry.value().clone())
    }

    /// Like [`GroupRegistry::get`], but reports a missing group as an error.
    pub fn require(&self, name: &str) -> Result<Arc<Group>, CacheError> {
        self.get(name)
            .ok_or_else(|| CacheError::NoSuchGroup(name.to_string()))
    }

    pub fn has_group(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Names of all registered groups, sorted.
    pub fn group_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .groups
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        names
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Stats of every group, sorted by name.
    pub fn reports(&self) -> Vec<GroupReport> {
        let mut reports: Vec<GroupReport> = self
            .groups
            .iter()
            .map(|entry| entry.value().report())
            .collect();
        reports.sort_by(|a, b| a.name.cmp(&b.name));
        reports
    }
}

impl Default for GroupRegistry {
    fn default() -> Self {
        Self {
            groups: DashMap::new(),
        }
    }
}
