//! Host resources the guard can act on.
//!
//! The host owns these values. The guard only reads the type and status and
//! asks the host to change the status.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Identifier of a host resource.
pub type ResourceId = u64;

/// Kind of a host resource, as named by the host's post-type slug.
///
/// Equality and hashing go through the slug, so `Other("product")` is the
/// same type as [`Product`](Self::Product).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceType {
    /// A catalog product (`product`)
    Product,
    /// A variation of a product (`product_variation`)
    ProductVariation,
    /// Any other host type, e.g. `page` or `post`
    Other(String),
}

impl ResourceType {
    /// Maps a host slug onto a resource type.
    pub fn from_slug(slug: &str) -> Self {
        match slug {
            "product" => Self::Product,
            "product_variation" => Self::ProductVariation,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the host slug for this type.
    pub fn as_slug(&self) -> &str {
        match self {
            Self::Product => "product",
            Self::ProductVariation => "product_variation",
            Self::Other(slug) => slug,
        }
    }
}

impl PartialEq for ResourceType {
    fn eq(&self, other: &Self) -> bool {
        self.as_slug() == other.as_slug()
    }
}

impl Eq for ResourceType {}

impl Hash for ResourceType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slug().hash(state);
    }
}

impl From<String> for ResourceType {
    fn from(slug: String) -> Self {
        Self::from_slug(&slug)
    }
}

impl From<ResourceType> for String {
    fn from(t: ResourceType) -> Self {
        t.as_slug().to_string()
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_slug())
    }
}

/// Publication status of a host resource.
///
/// Compared by slug, like [`ResourceType`].
#[derive(Debug, Clone)]
pub enum ResourceStatus {
    /// Not public, not deleted
    Draft,
    /// Publicly visible (`publish`)
    Published,
    /// Soft-deleted (`trash`)
    Trashed,
    /// Any other host status, e.g. `pending` or `private`
    Other(String),
}

impl ResourceStatus {
    /// Maps a host status slug onto a status.
    pub fn from_slug(slug: &str) -> Self {
        match slug {
            "draft" => Self::Draft,
            "publish" => Self::Published,
            "trash" => Self::Trashed,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the host slug for this status.
    pub fn as_slug(&self) -> &str {
        match self {
            Self::Draft => "draft",
            Self::Published => "publish",
            Self::Trashed => "trash",
            Self::Other(slug) => slug,
        }
    }
}

impl PartialEq for ResourceStatus {
    fn eq(&self, other: &Self) -> bool {
        self.as_slug() == other.as_slug()
    }
}

impl Eq for ResourceStatus {}

impl Hash for ResourceStatus {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slug().hash(state);
    }
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_slug())
    }
}

/// Catalog visibility of the commerce entity behind a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Listed in shop and search
    Visible,
    /// Hidden from shop and search
    Hidden,
}

/// A product-like resource as seen by the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Host identifier
    pub id: ResourceId,
    /// Host type
    pub kind: ResourceType,
    /// Current status
    pub status: ResourceStatus,
}

impl Resource {
    /// Creates a resource snapshot.
    pub fn new(id: ResourceId, kind: ResourceType, status: ResourceStatus) -> Self {
        Self { id, kind, status }
    }

    /// Returns true if the resource is already a draft.
    pub fn is_draft(&self) -> bool {
        self.status.as_slug() == ResourceStatus::Draft.as_slug()
    }
}

/// What a host hook hands over: either the resource itself or only its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRef {
    /// A resolved resource
    Resolved(Resource),
    /// A bare identifier the store still has to resolve
    Id(ResourceId),
}

impl ResourceRef {
    /// Returns the identifier of the referenced resource.
    pub fn id(&self) -> ResourceId {
        match self {
            Self::Resolved(r) => r.id,
            Self::Id(id) => *id,
        }
    }
}

impl From<Resource> for ResourceRef {
    fn from(r: Resource) -> Self {
        Self::Resolved(r)
    }
}

impl From<ResourceId> for ResourceRef {
    fn from(id: ResourceId) -> Self {
        Self::Id(id)
    }
}
