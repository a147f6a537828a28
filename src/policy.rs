/// A rule a request must satisfy to be attributed to the connector.
///
/// Rules are evaluated by [`RequestOriginClassifier`](crate::RequestOriginClassifier)
/// in the order listed here; the first failing rule decides the rejection.
/// They are deliberately loose fingerprints, not an authentication scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginRule {
    /// The URI contains the endpoint marker, case-insensitively
    EndpointMatch,
    /// The auth parameter is present and non-empty
    AuthTokenPresent,
    /// The source address is on the allow-list (skipped when the list is empty)
    SourceAllowed,
}

impl OriginRule {
    /// All rules in evaluation order.
    pub const ALL: [OriginRule; 3] = [
        OriginRule::EndpointMatch,
        OriginRule::AuthTokenPresent,
        OriginRule::SourceAllowed,
    ];
}
