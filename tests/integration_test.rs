use draft_guard::audit::{AuditTrail, RecordOutcome};
use draft_guard::testing::MemoryStore;
use draft_guard::{
    AppliedTransition, DeletionInterceptor, GuardConfig, InterceptionDecision, Operation,
    Request, Resource, ResourceStatus, ResourceType, TokenCheck,
};

const CONNECTOR_URI: &str = "/jtlconnector/?jtlauth=abc";

fn product(status: ResourceStatus) -> Resource {
    Resource::new(100, ResourceType::Product, status)
}

fn run(
    config: GuardConfig,
    request: &Request,
    resource: &Resource,
) -> (InterceptionDecision, MemoryStore) {
    let store = MemoryStore::new();
    store.insert(resource.clone());
    let decision = DeletionInterceptor::new(config, &store).intercept(
        request,
        Some(resource),
        Operation::Delete,
    );
    (decision, store)
}

#[test]
fn scenario_a_connector_deletes_published_product() {
    let req = Request::from_uri("req-a", CONNECTOR_URI);
    let (decision, store) = run(GuardConfig::default(), &req, &product(ResourceStatus::Published));

    assert!(!decision.allow);
    assert_eq!(decision.applied_transition, AppliedTransition::SetDraft);
    assert_eq!(store.status_calls(), vec![(100, ResourceStatus::Draft)]);
    assert_eq!(store.resolve_status(100), Some(ResourceStatus::Draft));
}

#[test]
fn scenario_b_other_endpoint_defers() {
    let req = Request::from_uri("req-b", "/shop/checkout");
    let (decision, store) = run(GuardConfig::default(), &req, &product(ResourceStatus::Published));

    assert!(decision.allow);
    assert_eq!(decision.applied_transition, AppliedTransition::None);
    assert!(store.status_calls().is_empty());
}

#[test]
fn scenario_c_connector_on_page_defers() {
    let req = Request::from_uri("req-c", CONNECTOR_URI);
    let page = Resource::new(5, ResourceType::from_slug("page"), ResourceStatus::Published);
    let (decision, store) = run(GuardConfig::default(), &req, &page);

    assert_eq!(decision, InterceptionDecision::DEFER);
    assert!(store.status_calls().is_empty());
}

#[test]
fn scenario_d_connector_on_draft_blocks_without_mutation() {
    let req = Request::from_uri("req-d", CONNECTOR_URI);
    let (decision, store) = run(GuardConfig::default(), &req, &product(ResourceStatus::Draft));

    assert!(!decision.allow);
    assert_eq!(decision.applied_transition, AppliedTransition::None);
    assert!(store.status_calls().is_empty());
}

#[test]
fn scenario_e_allow_list_miss_defers() {
    let config = GuardConfig::default().with_source_allow_list(["10.1.1.1"]);
    let req = Request::from_uri("req-e", CONNECTOR_URI).with_source_address("203.0.113.9");
    let (decision, store) = run(config, &req, &product(ResourceStatus::Published));

    assert_eq!(decision, InterceptionDecision::DEFER);
    assert!(store.status_calls().is_empty());
}

#[test]
fn allow_list_hit_is_intercepted() {
    let config = GuardConfig::default().with_source_allow_list(["10.1.1.1"]);
    let req = Request::from_uri("req-e2", CONNECTOR_URI).with_source_address("10.1.1.1");
    let (decision, _) = run(config, &req, &product(ResourceStatus::Published));

    assert_eq!(decision, InterceptionDecision::DRAFTED);
}

#[test]
fn variation_is_guarded_too() {
    let req = Request::from_uri("req-v", CONNECTOR_URI);
    let variation = Resource::new(8, ResourceType::ProductVariation, ResourceStatus::Published);
    let (decision, store) = run(GuardConfig::default(), &req, &variation);

    assert_eq!(decision, InterceptionDecision::DRAFTED);
    assert_eq!(store.resolve_status(8), Some(ResourceStatus::Draft));
}

#[test]
fn empty_auth_token_is_not_treated_as_connector() {
    let req = Request::from_uri("req-empty", "/jtlconnector/?jtlauth=");
    let (decision, store) = run(GuardConfig::default(), &req, &product(ResourceStatus::Published));

    assert_eq!(decision, InterceptionDecision::DEFER);
    assert!(store.status_calls().is_empty());
}

#[test]
fn token_check_modes_follow_config() {
    let resource = product(ResourceStatus::Published);
    // Token only present with a different case: seen by the raw scan, not by lookup.
    let req = Request::from_uri("req-t", "/jtlconnector/?JTLAUTH=abc");

    let parsed = GuardConfig::default().with_token_check(TokenCheck::ParsedParams);
    let raw = GuardConfig::default().with_token_check(TokenCheck::RawQuery);

    assert_eq!(run(parsed, &req, &resource).0, InterceptionDecision::DEFER);
    assert_eq!(run(raw, &req, &resource).0, InterceptionDecision::DRAFTED);
}

#[test]
fn config_from_toml_drives_interceptor() {
    let config = GuardConfig::from_toml_str(
        r#"
        debug = true
        source_allow_list = ["10.0.0.5"]
        "#,
    )
    .expect("valid config");

    let store = MemoryStore::new();
    let resource = product(ResourceStatus::Published);
    store.insert(resource.clone());
    let trail = AuditTrail::new();
    let interceptor = DeletionInterceptor::new(config, &store).with_diagnostics(&trail);

    let req = Request::from_uri("req-toml", "/jtlconnector/?jtlauth=abc")
        .with_source_address("10.0.0.5");
    let decision = interceptor.intercept(&req, Some(&resource), Operation::Trash);

    assert_eq!(decision, InterceptionDecision::DRAFTED);
    let records = trail.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].outcome(), RecordOutcome::Drafted);
    assert_eq!(
        records[0].message(),
        "keep-draft: prevented delete/trash for resource ID 100 from IP 10.0.0.5 \
         (URI=/jtlconnector/?jtlauth=[REDACTED])"
    );
}

#[test]
fn resource_is_never_removed_by_connector() {
    let store = MemoryStore::new();
    store.insert(product(ResourceStatus::Published));
    let interceptor = DeletionInterceptor::new(GuardConfig::default(), &store);
    let req = Request::from_uri("req-n", CONNECTOR_URI);

    for op in [Operation::Trash, Operation::Delete, Operation::Delete] {
        let current = store
            .resolve_status(100)
            .map(|s| Resource::new(100, ResourceType::Product, s));
        let decision = interceptor.intercept(&req, current.as_ref(), op);
        assert!(decision.is_veto());
    }

    assert!(store.contains(100));
    assert_eq!(store.resolve_status(100), Some(ResourceStatus::Draft));
    assert_eq!(store.status_calls().len(), 1);
}
