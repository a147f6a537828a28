//! In-memory host doubles.
//!
//! `MemoryStore` and `MemoryCatalog` implement the host traits over plain
//! maps and record every call, so tests can assert exactly which mutations
//! the guard requested.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::error::StoreError;
use crate::host::{CommerceCatalog, CommerceEntity, ResourceStore};
use crate::resource::{Resource, ResourceId, ResourceStatus, Visibility};

/// Resource store backed by a map.
///
/// # Examples
///
/// ```
/// use draft_guard::testing::MemoryStore;
/// use draft_guard::{Resource, ResourceStatus, ResourceStore, ResourceType};
///
/// let store = MemoryStore::new();
/// store.insert(Resource::new(1, ResourceType::Product, ResourceStatus::Published));
///
/// store.set_status(1, ResourceStatus::Draft).unwrap();
/// assert_eq!(store.resolve(1).unwrap().status, ResourceStatus::Draft);
/// assert_eq!(store.status_calls(), vec![(1, ResourceStatus::Draft)]);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    resources: RefCell<HashMap<ResourceId, Resource>>,
    status_calls: RefCell<Vec<(ResourceId, ResourceStatus)>>,
    fail_writes: Cell<bool>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a resource.
    pub fn insert(&self, resource: Resource) {
        self.resources.borrow_mut().insert(resource.id, resource);
    }

    /// Makes every subsequent `set_status` fail with [`StoreError::Write`].
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Returns every `set_status` call, including failed ones, in order.
    pub fn status_calls(&self) -> Vec<(ResourceId, ResourceStatus)> {
        self.status_calls.borrow().clone()
    }

    /// Returns the stored status of a resource.
    pub fn resolve_status(&self, id: ResourceId) -> Option<ResourceStatus> {
        self.resources.borrow().get(&id).map(|r| r.status.clone())
    }

    /// Returns true if the resource is still stored.
    pub fn contains(&self, id: ResourceId) -> bool {
        self.resources.borrow().contains_key(&id)
    }
}

impl ResourceStore for MemoryStore {
    fn resolve(&self, id: ResourceId) -> Option<Resource> {
        self.resources.borrow().get(&id).cloned()
    }

    fn set_status(&self, id: ResourceId, status: ResourceStatus) -> Result<(), StoreError> {
        self.status_calls.borrow_mut().push((id, status.clone()));

        if self.fail_writes.get() {
            return Err(StoreError::Write("simulated write failure".to_string()));
        }

        match self.resources.borrow_mut().get_mut(&id) {
            Some(resource) => {
                resource.status = status;
                Ok(())
            }
            None => Err(StoreError::NotFound(id)),
        }
    }
}

/// Observable state of one entity in a [`MemoryCatalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityState {
    /// Persisted catalog visibility
    pub visibility: Visibility,
    /// Number of successful saves
    pub saves: usize,
}

/// Commerce catalog backed by a map.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    entities: RefCell<HashMap<ResourceId, EntityState>>,
    fail_saves: Cell<bool>,
}

impl MemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a visible entity for the given resource id.
    pub fn insert(&self, id: ResourceId) {
        self.entities.borrow_mut().insert(
            id,
            EntityState {
                visibility: Visibility::Visible,
                saves: 0,
            },
        );
    }

    /// Makes every subsequent `save` fail.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    /// Returns the persisted state of an entity.
    pub fn state(&self, id: ResourceId) -> Option<EntityState> {
        self.entities.borrow().get(&id).copied()
    }
}

impl CommerceCatalog for MemoryCatalog {
    fn load(&self, id: ResourceId) -> Option<Box<dyn CommerceEntity + '_>> {
        let state = self.state(id)?;
        Some(Box::new(MemoryEntity {
            catalog: self,
            id,
            visibility: state.visibility,
        }))
    }
}

struct MemoryEntity<'a> {
    catalog: &'a MemoryCatalog,
    id: ResourceId,
    visibility: Visibility,
}

impl CommerceEntity for MemoryEntity<'_> {
    fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    fn save(&mut self) -> Result<(), StoreError> {
        if self.catalog.fail_saves.get() {
            return Err(StoreError::Write("simulated save failure".to_string()));
        }
        let mut entities = self.catalog.entities.borrow_mut();
        let state = entities.get_mut(&self.id).ok_or(StoreError::NotFound(self.id))?;
        state.visibility = self.visibility;
        state.saves += 1;
        Ok(())
    }
}
