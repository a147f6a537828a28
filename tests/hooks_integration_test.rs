//! Integration tests for the host hook adapters.
//!
//! These walk the complete flow a host goes through: building a request from
//! the raw URI, firing the pre-trash / pre-delete / commit hooks, and turning
//! the outcome into a filter value and a connector reply.

use std::io;
use std::sync::{Arc, Mutex};

use draft_guard::audit::{AuditTrail, RecordOutcome};
use draft_guard::testing::{MemoryCatalog, MemoryStore};
use draft_guard::{
    DeletionInterceptor, GuardConfig, HookOutcome, HostHooks, InterceptionDecision, Request,
    Resource, ResourceRef, ResourceStatus, ResourceType, Visibility,
};

fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.insert(Resource::new(10, ResourceType::Product, ResourceStatus::Published));
    store.insert(Resource::new(11, ResourceType::ProductVariation, ResourceStatus::Published));
    store.insert(Resource::new(12, ResourceType::from_slug("post"), ResourceStatus::Published));
    store
}

#[test]
fn connector_sync_run_keeps_everything() {
    let store = seeded_store();
    let catalog = MemoryCatalog::new();
    catalog.insert(10);
    catalog.insert(11);
    let trail = AuditTrail::new();

    let config = GuardConfig::default()
        .with_debug(true)
        .with_hide_from_catalog(true);
    let hooks = HostHooks::new(
        DeletionInterceptor::new(config, &store)
            .with_commerce(&catalog)
            .with_diagnostics(&trail),
    );

    let req = Request::from_uri("sync-1", "/jtlconnector/?jtlauth=k3y")
        .with_source_address("198.51.100.7");

    // The connector trashes the product and force-deletes the variation.
    let trash = hooks.pre_trash(&req, &ResourceRef::Id(10), None::<bool>);
    let delete = hooks.pre_delete(&req, &ResourceRef::Id(11), true, None::<bool>);

    assert_eq!(trash.into_filter_value(Some(false)), Some(false));
    assert_eq!(delete.into_filter_value(Some(false)), Some(false));

    for id in [10, 11] {
        assert!(store.contains(id));
        assert_eq!(store.resolve_status(id), Some(ResourceStatus::Draft));
        assert_eq!(catalog.state(id).unwrap().visibility, Visibility::Hidden);
    }

    // Posts are not products: the host deletes as usual.
    let post = hooks.pre_delete(&req, &ResourceRef::Id(12), true, None::<bool>);
    assert_eq!(post, HookOutcome::PassThrough(None));

    let records = trail.records();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.outcome() == RecordOutcome::Drafted));
    assert!(records.iter().all(|r| !r.uri().contains("k3y")));
}

#[test]
fn admin_requests_are_untouched() {
    let store = seeded_store();
    let hooks = HostHooks::new(DeletionInterceptor::new(GuardConfig::default(), &store));

    let req = Request::from_uri("admin-1", "/wp-admin/post.php?post=10&action=trash");
    let outcome = hooks.pre_trash(&req, &ResourceRef::Id(10), "prior");

    assert_eq!(outcome, HookOutcome::PassThrough("prior"));
    assert!(store.status_calls().is_empty());
}

#[test]
fn commit_guard_catches_what_earlier_hooks_missed() {
    let store = seeded_store();
    let hooks = HostHooks::new(DeletionInterceptor::new(GuardConfig::default(), &store));
    let req = Request::from_uri("late-1", "/jtlconnector/?jtlauth=abc");

    // Only the last-resort guard fires.
    let outcome = hooks.pre_commit_guard(&req, &ResourceRef::Id(10));

    assert_eq!(outcome, HookOutcome::Veto(InterceptionDecision::DRAFTED));
    assert_eq!(store.resolve_status(10), Some(ResourceStatus::Draft));
}

#[test]
fn connector_reply_serializes_as_success() {
    let store = seeded_store();
    let hooks = HostHooks::new(DeletionInterceptor::new(GuardConfig::default(), &store));
    let req = Request::from_uri("reply-1", "/jtlconnector/?jtlauth=abc");

    let first = hooks.pre_trash(&req, &ResourceRef::Id(10), ());
    let second = hooks.pre_trash(&req, &ResourceRef::Id(10), ());

    let first_json = serde_json::to_value(first.connector_reply().unwrap()).unwrap();
    let second_json = serde_json::to_value(second.connector_reply().unwrap()).unwrap();

    assert_eq!(
        first_json,
        serde_json::json!({"success": true, "performed": false, "substitute": "draft"})
    );
    assert_eq!(
        second_json,
        serde_json::json!({"success": true, "performed": false, "substitute": "unchanged"})
    );
}

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn failed_draft_is_logged_and_still_vetoed() {
    let buf = SharedBuf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let store = seeded_store();
    store.fail_writes(true);
    let hooks = HostHooks::new(DeletionInterceptor::new(GuardConfig::default(), &store));
    let req = Request::from_uri("fail-1", "/jtlconnector/?jtlauth=SECRETTOKEN");

    let outcome = tracing::subscriber::with_default(subscriber, || {
        hooks.pre_delete(&req, &ResourceRef::Id(10), false, None::<bool>)
    });

    assert!(outcome.is_veto());
    assert!(store.contains(10));

    let logged = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
    assert!(logged.contains("draft update failed"));
    assert!(logged.contains("fail-1"));
    assert!(!logged.contains("SECRETTOKEN"));
}
