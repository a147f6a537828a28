use std::fmt;

use crate::{
    audit::{InterceptionRecord, RecordOutcome},
    classifier::RequestOriginClassifier,
    config::GuardConfig,
    error::StoreError,
    host::{CommerceCatalog, DiagnosticSink, ResourceStore},
    request::Request,
    resource::{Resource, ResourceRef, ResourceStatus, Visibility},
};

/// The destructive operation the host is about to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Move the resource to the trash
    Trash,
    /// Remove the resource permanently
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Trash => write!(f, "trash"),
            Operation::Delete => write!(f, "delete"),
        }
    }
}

/// State change applied in place of the vetoed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppliedTransition {
    /// Nothing was changed
    None,
    /// The resource was asked to become a draft
    SetDraft,
}

/// Result of one interception call. Computed fresh, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterceptionDecision {
    /// Whether the host may go on with the delete/trash
    pub allow: bool,
    /// What was done instead
    pub applied_transition: AppliedTransition,
}

impl InterceptionDecision {
    /// Let the host handle the operation as it normally would.
    pub const DEFER: Self = Self {
        allow: true,
        applied_transition: AppliedTransition::None,
    };

    /// Block the operation; nothing else to do.
    pub const BLOCK: Self = Self {
        allow: false,
        applied_transition: AppliedTransition::None,
    };

    /// Block the operation; the resource was switched to draft instead.
    pub const DRAFTED: Self = Self {
        allow: false,
        applied_transition: AppliedTransition::SetDraft,
    };

    /// Returns true if the host must not perform the operation.
    pub fn is_veto(&self) -> bool {
        !self.allow
    }
}

/// Turns connector-originated delete/trash requests into draft transitions.
///
/// For each call the interceptor:
///
/// 1. defers when the request is not attributed to the connector,
/// 2. defers when the resource cannot be identified,
/// 3. defers when the resource type is not guarded,
/// 4. blocks without changes when the resource is already a draft,
/// 5. otherwise asks the store to set `draft`, runs the optional commerce
///    side effect, and blocks.
///
/// The veto in step 5 does not depend on the store update succeeding: losing
/// the draft transition is less harmful than an unintended delete. Repeated
/// calls on the same resource stop at step 4, so the function is idempotent.
///
/// # Examples
///
/// ```
/// use draft_guard::testing::MemoryStore;
/// use draft_guard::{
///     DeletionInterceptor, GuardConfig, InterceptionDecision, Operation, Request, Resource,
///     ResourceStatus, ResourceType,
/// };
///
/// let store = MemoryStore::new();
/// let product = Resource::new(42, ResourceType::Product, ResourceStatus::Published);
/// store.insert(product.clone());
///
/// let interceptor = DeletionInterceptor::new(GuardConfig::default(), &store);
/// let request = Request::from_uri("req-1", "/jtlconnector/?jtlauth=abc");
///
/// let decision = interceptor.intercept(&request, Some(&product), Operation::Delete);
/// assert_eq!(decision, InterceptionDecision::DRAFTED);
/// assert_eq!(store.resolve_status(42), Some(ResourceStatus::Draft));
/// ```
pub struct DeletionInterceptor<'h> {
    classifier: RequestOriginClassifier,
    store: &'h dyn ResourceStore,
    commerce: Option<&'h dyn CommerceCatalog>,
    diagnostics: Option<&'h dyn DiagnosticSink>,
}

impl<'h> DeletionInterceptor<'h> {
    /// Creates an interceptor over the host's resource store.
    pub fn new(config: GuardConfig, store: &'h dyn ResourceStore) -> Self {
        Self {
            classifier: RequestOriginClassifier::new(config),
            store,
            commerce: None,
            diagnostics: None,
        }
    }

    /// Attaches the optional commerce integration.
    pub fn with_commerce(mut self, catalog: &'h dyn CommerceCatalog) -> Self {
        self.commerce = Some(catalog);
        self
    }

    /// Attaches a diagnostic sink. It is only used when `debug` is configured.
    pub fn with_diagnostics(mut self, sink: &'h dyn DiagnosticSink) -> Self {
        self.diagnostics = Some(sink);
        self
    }

    /// Returns the classifier used for origin checks.
    pub fn classifier(&self) -> &RequestOriginClassifier {
        &self.classifier
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &GuardConfig {
        self.classifier.config()
    }

    /// Decides what happens to a delete/trash of `resource`.
    pub fn intercept(
        &self,
        request: &Request,
        resource: Option<&Resource>,
        operation: Operation,
    ) -> InterceptionDecision {
        self.decide(request, || resource.cloned(), operation)
    }

    /// Like [`intercept`](Self::intercept), reading the target's current
    /// state from the store first. The store is only consulted for connector
    /// requests.
    ///
    /// A [`ResourceRef::Resolved`] snapshot is re-read by id as well, so a
    /// later hook sees the draft an earlier hook produced. The snapshot is
    /// used as is only when the store does not know the id.
    pub fn intercept_ref(
        &self,
        request: &Request,
        target: &ResourceRef,
        operation: Operation,
    ) -> InterceptionDecision {
        self.decide(
            request,
            || match target {
                ResourceRef::Resolved(snapshot) => self
                    .store
                    .resolve(snapshot.id)
                    .or_else(|| Some(snapshot.clone())),
                ResourceRef::Id(id) => self.store.resolve(*id),
            },
            operation,
        )
    }

    fn decide<F>(&self, request: &Request, resolve: F, operation: Operation) -> InterceptionDecision
    where
        F: FnOnce() -> Option<Resource>,
    {
        if !self.classifier.classify(request) {
            return InterceptionDecision::DEFER;
        }

        let request_id = request.request_id();

        let Some(resource) = resolve() else {
            tracing::debug!(%request_id, %operation, "target not resolvable, deferring to host");
            return InterceptionDecision::DEFER;
        };

        if !self.config().guards(&resource.kind) {
            tracing::debug!(
                %request_id,
                resource_id = resource.id,
                resource_type = %resource.kind,
                "type not guarded, deferring to host"
            );
            return InterceptionDecision::DEFER;
        }

        if resource.is_draft() {
            tracing::debug!(
                %request_id,
                resource_id = resource.id,
                %operation,
                "already draft, blocking"
            );
            self.emit(request, &resource, operation, RecordOutcome::AlreadyDraft, None);
            return InterceptionDecision::BLOCK;
        }

        match self.store.set_status(resource.id, ResourceStatus::Draft) {
            Ok(()) => {
                tracing::debug!(
                    %request_id,
                    resource_id = resource.id,
                    %operation,
                    "switched to draft instead"
                );
                self.apply_commerce_effect(&resource);
                self.emit(request, &resource, operation, RecordOutcome::Drafted, None);
            }
            Err(err) => {
                tracing::warn!(
                    %request_id,
                    resource_id = resource.id,
                    %operation,
                    error = %err,
                    "draft update failed, blocking anyway"
                );
                self.emit(
                    request,
                    &resource,
                    operation,
                    RecordOutcome::DraftFailed,
                    Some(&err),
                );
            }
        }

        InterceptionDecision::DRAFTED
    }

    fn apply_commerce_effect(&self, resource: &Resource) {
        let Some(catalog) = self.commerce else {
            return;
        };
        let Some(mut entity) = catalog.load(resource.id) else {
            return;
        };

        if self.config().hide_from_catalog {
            entity.set_visibility(Visibility::Hidden);
        }
        if let Err(err) = entity.save() {
            // Best effort only.
            tracing::debug!(resource_id = resource.id, error = %err, "commerce save failed");
        }
    }

    fn emit(
        &self,
        request: &Request,
        resource: &Resource,
        operation: Operation,
        outcome: RecordOutcome,
        error: Option<&StoreError>,
    ) {
        if !self.config().debug {
            return;
        }
        let Some(sink) = self.diagnostics else {
            return;
        };

        let mut record = InterceptionRecord::capture(
            request,
            &self.config().auth_param,
            resource,
            operation,
            outcome,
        );
        if let Some(err) = error {
            record = record.with_detail(err.to_string());
        }
        sink.record(&record);
    }
}

impl fmt::Debug for DeletionInterceptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeletionInterceptor")
            .field("classifier", &self.classifier)
            .field("commerce", &self.commerce.is_some())
            .field("diagnostics", &self.diagnostics.is_some())
            .finish()
    }
}
