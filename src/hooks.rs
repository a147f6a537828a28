//! Host extension-point adapters.
//!
//! The host exposes several places where a delete can be stopped: before a
//! trash, before a permanent delete, and a last-resort guard right before the
//! deletion is committed. All of them funnel into the same
//! [`DeletionInterceptor`] decision, so the behaviour is identical no matter
//! which one fires first. The target is re-read from the store on every
//! call, so a later hook short-circuits on the draft the earlier one produced
//! even when the host hands over the same stale snapshot.
//!
//! # Integration Flow
//!
//! ```text
//! host "about to trash/delete"
//!   ↓
//! HostHooks::pre_trash / pre_delete / pre_commit_guard
//!   ↓
//! DeletionInterceptor (classify → inspect → draft)
//!   ↓
//! HookOutcome::PassThrough(prior)  or  HookOutcome::Veto(decision)
//!   ↓
//! host returns prior value, or its short-circuit value plus a
//! success-shaped ConnectorReply
//! ```

use serde::Serialize;

use crate::interceptor::{AppliedTransition, DeletionInterceptor, InterceptionDecision, Operation};
use crate::request::Request;
use crate::resource::ResourceRef;

/// What a hook tells the host to do.
///
/// `P` is whatever value the host's filter chain handed to the hook before
/// this guard ran; it is returned untouched when the guard does not act.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome<P> {
    /// Let the host continue with the value it already had
    PassThrough(P),
    /// Stop the operation
    Veto(InterceptionDecision),
}

impl<P> HookOutcome<P> {
    fn from_decision(decision: InterceptionDecision, prior: P) -> Self {
        if decision.allow {
            HookOutcome::PassThrough(prior)
        } else {
            HookOutcome::Veto(decision)
        }
    }

    /// Returns true if the host must not perform the operation.
    pub fn is_veto(&self) -> bool {
        matches!(self, HookOutcome::Veto(_))
    }

    /// Collapses the outcome into the host's filter value: the prior value on
    /// pass-through, `veto` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use draft_guard::{HookOutcome, InterceptionDecision};
    ///
    /// // A host whose "pre delete" filter short-circuits on Some(false).
    /// let pass: HookOutcome<Option<bool>> = HookOutcome::PassThrough(None);
    /// let veto: HookOutcome<Option<bool>> = HookOutcome::Veto(InterceptionDecision::DRAFTED);
    ///
    /// assert_eq!(pass.into_filter_value(Some(false)), None);
    /// assert_eq!(veto.into_filter_value(Some(false)), Some(false));
    /// ```
    pub fn into_filter_value(self, veto: P) -> P {
        match self {
            HookOutcome::PassThrough(prior) => prior,
            HookOutcome::Veto(_) => veto,
        }
    }

    /// Builds the reply the host should send to the connector for a veto.
    ///
    /// The reply is success-shaped so the connector does not treat the
    /// refused delete as a fatal integration error. Returns `None` on
    /// pass-through, where the host answers as usual.
    pub fn connector_reply(&self) -> Option<ConnectorReply> {
        match self {
            HookOutcome::PassThrough(_) => None,
            HookOutcome::Veto(decision) => Some(ConnectorReply {
                success: true,
                performed: false,
                substitute: match decision.applied_transition {
                    AppliedTransition::SetDraft => Substitute::Draft,
                    AppliedTransition::None => Substitute::Unchanged,
                },
            }),
        }
    }
}

/// What the connector is told happened instead of its delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Substitute {
    /// The resource was switched to draft
    Draft,
    /// The resource was left as it was
    Unchanged,
}

/// Success-shaped reply for a vetoed connector request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConnectorReply {
    /// Always true: a veto is not an error from the connector's point of view
    pub success: bool,
    /// Whether the requested delete/trash actually happened
    pub performed: bool,
    /// What happened instead
    pub substitute: Substitute,
}

/// Entry points for the host's delete/trash hooks.
///
/// # Examples
///
/// ```
/// use draft_guard::testing::MemoryStore;
/// use draft_guard::{
///     DeletionInterceptor, GuardConfig, HostHooks, Request, Resource, ResourceRef,
///     ResourceStatus, ResourceType,
/// };
///
/// let store = MemoryStore::new();
/// store.insert(Resource::new(7, ResourceType::Product, ResourceStatus::Published));
/// let hooks = HostHooks::new(DeletionInterceptor::new(GuardConfig::default(), &store));
///
/// let request = Request::from_uri("req-1", "/jtlconnector/?jtlauth=abc");
/// let outcome = hooks.pre_trash(&request, &ResourceRef::Id(7), None::<bool>);
///
/// assert!(outcome.is_veto());
/// assert!(!outcome.connector_reply().unwrap().performed);
/// ```
#[derive(Debug)]
pub struct HostHooks<'h> {
    interceptor: DeletionInterceptor<'h>,
}

impl<'h> HostHooks<'h> {
    /// Wraps an interceptor.
    pub fn new(interceptor: DeletionInterceptor<'h>) -> Self {
        Self { interceptor }
    }

    /// Returns the wrapped interceptor.
    pub fn interceptor(&self) -> &DeletionInterceptor<'h> {
        &self.interceptor
    }

    /// Host is about to move `target` to the trash.
    pub fn pre_trash<P>(
        &self,
        request: &Request,
        target: &ResourceRef,
        prior: P,
    ) -> HookOutcome<P> {
        let decision = self
            .interceptor
            .intercept_ref(request, target, Operation::Trash);
        HookOutcome::from_decision(decision, prior)
    }

    /// Host is about to delete `target`. `force_delete` (skip the trash) does
    /// not change the decision: a connector delete is vetoed either way.
    pub fn pre_delete<P>(
        &self,
        request: &Request,
        target: &ResourceRef,
        force_delete: bool,
        prior: P,
    ) -> HookOutcome<P> {
        let decision = self
            .interceptor
            .intercept_ref(request, target, Operation::Delete);
        if decision.is_veto() {
            tracing::debug!(
                request_id = %request.request_id(),
                resource_id = target.id(),
                force_delete,
                "pre-delete vetoed"
            );
        }
        HookOutcome::from_decision(decision, prior)
    }

    /// Last-resort guard right before the host commits a deletion.
    ///
    /// Uses the same decision as the other hooks; if an earlier hook already
    /// drafted the resource this blocks without further changes.
    pub fn pre_commit_guard(&self, request: &Request, target: &ResourceRef) -> HookOutcome<()> {
        let decision = self
            .interceptor
            .intercept_ref(request, target, Operation::Delete);
        HookOutcome::from_decision(decision, ())
    }
}
