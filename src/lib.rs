//! Keeps connector-deleted products as drafts.
//!
//! An external integration (the JTL connector) syncs a shop catalog and
//! sometimes asks the host to trash or delete products. This crate sits in
//! front of those operations and, for requests that look like they come from
//! the connector, switches the product to draft instead of letting it go.
//!
//! # Core Types
//!
//! - [`RequestOriginClassifier`]: heuristic check whether a [`Request`] is the connector's
//! - [`DeletionInterceptor`]: decides per resource, applies the draft transition
//! - [`HostHooks`]: adapters for the host's pre-trash / pre-delete / pre-commit hooks
//! - [`GuardConfig`]: injected configuration (debug flag, source allow-list, ...)
//! - [`ResourceStore`], [`CommerceCatalog`], [`DiagnosticSink`]: host boundaries
//!
//! # Examples
//!
//! ```
//! use draft_guard::testing::MemoryStore;
//! use draft_guard::{
//!     DeletionInterceptor, GuardConfig, InterceptionDecision, Operation, Request, Resource,
//!     ResourceStatus, ResourceType,
//! };
//!
//! let store = MemoryStore::new();
//! let product = Resource::new(1, ResourceType::Product, ResourceStatus::Published);
//! store.insert(product.clone());
//!
//! let guard = DeletionInterceptor::new(GuardConfig::default(), &store);
//!
//! // Connector request: vetoed, product drafted.
//! let jtl = Request::from_uri("req-1", "/jtlconnector/?jtlauth=abc");
//! assert_eq!(
//!     guard.intercept(&jtl, Some(&product), Operation::Trash),
//!     InterceptionDecision::DRAFTED,
//! );
//!
//! // Anything else: host default behaviour.
//! let admin = Request::from_uri("req-2", "/wp-admin/edit.php");
//! assert_eq!(
//!     guard.intercept(&admin, Some(&product), Operation::Trash),
//!     InterceptionDecision::DEFER,
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod audit;
mod classifier;
mod config;
mod error;
mod hooks;
mod host;
mod interceptor;
mod policy;
mod request;
mod resource;
mod sanitizer;
mod secret;
pub mod testing;

pub use classifier::{ConnectorOrigin, RequestOriginClassifier};
pub use config::{GuardConfig, TokenCheck, DEFAULT_AUTH_PARAM, DEFAULT_ENDPOINT_MARKER};
pub use error::{ConfigError, Rejection, RejectionKind, StoreError};
pub use hooks::{ConnectorReply, HookOutcome, HostHooks, Substitute};
pub use host::{CommerceCatalog, CommerceEntity, DiagnosticSink, ResourceStore};
pub use interceptor::{AppliedTransition, DeletionInterceptor, InterceptionDecision, Operation};
pub use policy::OriginRule;
pub use request::Request;
pub use resource::{Resource, ResourceId, ResourceRef, ResourceStatus, ResourceType, Visibility};
pub use sanitizer::{TextSanitizer, DEFAULT_MAX_LEN};
pub use secret::{Secret, REDACTED};
