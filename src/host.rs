//! Collaborator interfaces the host implements.
//!
//! The guard never talks to a database or an e-commerce plugin directly.
//! Each boundary is a trait taking `&self`; hosts that need to mutate state
//! behind it use interior mutability, as the in-memory doubles in
//! [`testing`](crate::testing) do.
//!
//! Calls are synchronous and made once per request. Serialising concurrent
//! requests against the same resource is the host's job: the guard reads,
//! then writes, without a transaction.

use crate::audit::InterceptionRecord;
use crate::error::StoreError;
use crate::resource::{Resource, ResourceId, ResourceStatus, Visibility};

/// Read and status-update access to the host's resources.
pub trait ResourceStore {
    /// Looks up a resource by id. `None` when it does not exist or cannot be read.
    fn resolve(&self, id: ResourceId) -> Option<Resource>;

    /// Changes only the status of a resource.
    ///
    /// Implementations must not touch unrelated fields or timestamps beyond
    /// what the host requires for a status change.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the host fails the write.
    fn set_status(&self, id: ResourceId, status: ResourceStatus) -> Result<(), StoreError>;
}

/// Optional access to the commerce entity behind a resource.
pub trait CommerceCatalog {
    /// Loads the commerce entity for a resource, if one exists.
    fn load(&self, id: ResourceId) -> Option<Box<dyn CommerceEntity + '_>>;
}

/// A loaded commerce entity (for example a shop product).
pub trait CommerceEntity {
    /// Changes the catalog visibility in memory.
    fn set_visibility(&mut self, visibility: Visibility);

    /// Persists pending changes and refreshes derived commerce state.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the host fails the write.
    fn save(&mut self) -> Result<(), StoreError>;
}

/// Destination for diagnostic records.
pub trait DiagnosticSink {
    /// Records one vetoed operation. Must not fail the caller.
    fn record(&self, record: &InterceptionRecord);
}
